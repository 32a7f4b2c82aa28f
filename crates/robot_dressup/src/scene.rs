use bevy::color::palettes::css::{DARK_SLATE_GRAY, GOLD, LIGHT_SLATE_GRAY, STEEL_BLUE};
use bevy::prelude::*;

use crate::blink::{Blinker, Eyelid};
use crate::config::DressupConfig;
use crate::item::DraggableItem;
use crate::slot::{EquipSlot, SlotGlow, SlotHighlight};

// Layout of the one-robot scene, in window pixels.
pub const ROBOT_POSITION: Vec2 = Vec2::new(0.0, 20.0);
pub const ROBOT_SIZE: Vec2 = Vec2::new(160.0, 260.0);
pub const TORSO_POSITION: Vec2 = Vec2::new(0.0, 30.0);
pub const TORSO_SIZE: Vec2 = Vec2::new(100.0, 80.0);
/// Items snap slightly above the slot center, onto the chest.
pub const TORSO_ANCHOR: Vec2 = Vec2::new(0.0, 40.0);
pub const JACKET_ORIGIN: Vec2 = Vec2::new(-120.0, -240.0);
pub const JACKET_SIZE: Vec2 = Vec2::new(80.0, 60.0);

const EYE_OFFSETS: [Vec2; 2] = [Vec2::new(-28.0, 100.0), Vec2::new(28.0, 100.0)];
const EYELID_WIDTH: f32 = 26.0;
const EYELID_CLOSED_HEIGHT: f32 = 10.0;

// z ordering: robot < slot glow < jacket, so the glow sits between the body
// and the clothing unless the highlight lifts it on top.
const ROBOT_Z: f32 = 0.0;
const SLOT_Z: f32 = 0.5;
const JACKET_Z: f32 = 2.0;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup);
    }
}

fn setup(mut commands: Commands, config: Res<DressupConfig>) {
    commands.spawn(Camera2d);

    // The robot, with its blinking eyes.
    commands
        .spawn((
            Sprite::from_color(Color::Srgba(LIGHT_SLATE_GRAY), ROBOT_SIZE),
            Transform::from_translation(ROBOT_POSITION.extend(ROBOT_Z)),
            Blinker::new(&config),
        ))
        .with_children(|parent| {
            for offset in EYE_OFFSETS {
                parent.spawn((
                    Sprite::from_color(Color::Srgba(DARK_SLATE_GRAY), Vec2::ONE),
                    Transform::from_translation(offset.extend(0.1)),
                    Eyelid {
                        anchor: offset,
                        width: EYELID_WIDTH,
                        closed_height: EYELID_CLOSED_HEIGHT,
                    },
                ));
            }
        });

    // The torso slot. Invisible itself; only its glow overlay ever shows.
    commands
        .spawn((
            EquipSlot::new(TORSO_SIZE / 2.0).with_anchor(TORSO_ANCHOR),
            SlotHighlight::default(),
            Transform::from_translation(TORSO_POSITION.extend(SLOT_Z)),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Sprite::from_color(Color::Srgba(GOLD), TORSO_SIZE * 1.15),
                Transform::from_xyz(0.0, 0.0, 0.0),
                Visibility::Hidden,
                SlotGlow { base_z: 0.0 },
            ));
        });

    // The jacket, waiting in the corner.
    commands.spawn((
        Sprite::from_color(Color::Srgba(STEEL_BLUE), JACKET_SIZE),
        Transform::from_translation(JACKET_ORIGIN.extend(JACKET_Z)),
        DraggableItem::new(JACKET_ORIGIN, JACKET_SIZE / 2.0),
    ));
}
