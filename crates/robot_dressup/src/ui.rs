use bevy::prelude::*;
use toy_helpers::FONT;

use crate::item::{EquipSucceeded, ResetRequested};
use crate::tutorial::{TutorialSkipped, TutorialState};

/// Button that puts the jacket back in the corner; hidden until an item is
/// equipped.
#[derive(Component)]
pub struct ResetButton;

/// Skip button on the tutorial overlay.
#[derive(Component)]
pub struct SkipButton;

/// Prompt text of the current tutorial step.
#[derive(Component)]
pub struct TutorialMessageText;

/// Root of the tutorial overlay, for teardown.
#[derive(Component)]
pub struct TutorialOverlay;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_reset_button)
            .add_systems(
                Update,
                (reset_button_visibility, reset_button_interaction),
            )
            .add_systems(OnEnter(TutorialState::Running), spawn_tutorial_overlay)
            .add_systems(OnExit(TutorialState::Running), despawn_tutorial_overlay)
            .add_systems(
                Update,
                skip_button_interaction.run_if(in_state(TutorialState::Running)),
            );
    }
}

fn spawn_reset_button(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands
        .spawn((
            Button,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(20.0),
                right: Val::Px(20.0),
                width: Val::Px(100.0),
                height: Val::Px(44.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.15, 0.15, 0.2, 0.9)),
            Visibility::Hidden,
            ResetButton,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Reset"),
                TextFont {
                    font: asset_server.load(FONT),
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// Revealed on a successful equip, hidden again once the scene resets.
fn reset_button_visibility(
    mut equipped: EventReader<EquipSucceeded>,
    mut resets: EventReader<ResetRequested>,
    mut buttons: Query<&mut Visibility, With<ResetButton>>,
) {
    let show = equipped.read().next().is_some();
    let hide = resets.read().next().is_some();
    if !show && !hide {
        return;
    }
    for mut visibility in &mut buttons {
        // A reset in the same frame wins; the scene is back to its start.
        *visibility = if hide {
            Visibility::Hidden
        } else {
            Visibility::Visible
        };
    }
}

fn reset_button_interaction(
    mut interactions: Query<&Interaction, (Changed<Interaction>, With<ResetButton>)>,
    mut resets: EventWriter<ResetRequested>,
) {
    for interaction in &mut interactions {
        if *interaction == Interaction::Pressed {
            resets.send(ResetRequested);
        }
    }
}

fn spawn_tutorial_overlay(mut commands: Commands, asset_server: Res<AssetServer>) {
    let font = asset_server.load(FONT);

    // Dim layer behind the prompt; gameplay input is filtered by the gate,
    // not by this layer.
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.4)),
        TutorialOverlay,
    ));

    // Prompt box near the bottom of the screen.
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Percent(12.0),
                width: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            TutorialOverlay,
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        padding: UiRect::all(Val::Px(14.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Text::new(""),
                        TextFont {
                            font: font.clone(),
                            font_size: 26.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        TextLayout::new_with_justify(JustifyText::Center),
                        TutorialMessageText,
                    ));
                });
        });

    // Skip button, top right.
    commands
        .spawn((
            Button,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(20.0),
                right: Val::Px(20.0),
                width: Val::Px(90.0),
                height: Val::Px(36.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            SkipButton,
            TutorialOverlay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Skip"),
                TextFont {
                    font,
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

fn despawn_tutorial_overlay(
    mut commands: Commands,
    overlays: Query<Entity, With<TutorialOverlay>>,
) {
    for entity in &overlays {
        commands.entity(entity).despawn_recursive();
    }
}

fn skip_button_interaction(
    mut interactions: Query<&Interaction, (Changed<Interaction>, With<SkipButton>)>,
    mut skips: EventWriter<TutorialSkipped>,
) {
    for interaction in &mut interactions {
        if *interaction == Interaction::Pressed {
            skips.send(TutorialSkipped);
        }
    }
}
