use bevy::prelude::*;

use crate::DressupSet;
use crate::item::{DraggableItem, ItemState};
use crate::persist;
use crate::slot::EquipSlot;
use crate::ui::TutorialMessageText;

/// Lifecycle of the scripted onboarding sequence.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
pub enum TutorialState {
    /// Never started this session (tutorial already completed earlier).
    #[default]
    Inactive,
    Running,
    Finished,
}

/// Session-wide permission filter for pick/drop, consulted synchronously by
/// the item state machine. Inactive means unrestricted free play.
#[derive(Resource, Default, Debug)]
pub struct TutorialGate {
    pub active: bool,
    /// `None` while active means any item may be picked.
    pub allowed_item: Option<Entity>,
    /// Overrides `allowed_item` when set.
    pub allow_any_pick: bool,
    /// `None` while active means any drop location is fine.
    pub allowed_slot: Option<Entity>,
}

impl TutorialGate {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn allow_pick(&self, item: Entity) -> bool {
        if !self.active || self.allow_any_pick {
            return true;
        }
        self.allowed_item.is_none_or(|allowed| allowed == item)
    }

    /// `slot_hit` is the slot found at the drop point, if any. Pick and drop
    /// restrictions are independent: `allow_any_pick` does not loosen this.
    pub fn allow_drop(&self, slot_hit: Option<Entity>) -> bool {
        if !self.active {
            return true;
        }
        self.allowed_slot
            .is_none_or(|allowed| slot_hit == Some(allowed))
    }
}

/// What an onboarding step waits for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StepTarget {
    ItemPickedUp,
    ItemEquippedAtTarget,
}

/// One onboarding step: a prompt plus the gate shape while it is active.
#[derive(Clone, Debug)]
pub struct TutorialStep {
    pub message: &'static str,
    pub target: StepTarget,
    /// Restrict picking to the bound item while this step runs.
    pub gate_pick: bool,
    /// Restrict dropping to the bound slot while this step runs.
    pub gate_drop_on_slot: bool,
}

/// Ordered steps plus the cursor; immutable once loaded.
#[derive(Resource)]
pub struct StepDriver {
    steps: Vec<TutorialStep>,
    index: usize,
}

impl StepDriver {
    pub fn new(steps: Vec<TutorialStep>) -> Self {
        Self { steps, index: 0 }
    }

    pub fn current(&self) -> Option<&TutorialStep> {
        self.steps.get(self.index)
    }
}

impl Default for StepDriver {
    fn default() -> Self {
        Self::new(vec![
            TutorialStep {
                message: "Drag the jacket",
                target: StepTarget::ItemPickedUp,
                gate_pick: true,
                gate_drop_on_slot: false,
            },
            TutorialStep {
                message: "Drop it on the torso",
                target: StepTarget::ItemEquippedAtTarget,
                gate_pick: false,
                gate_drop_on_slot: true,
            },
        ])
    }
}

/// Fired by the skip button; ends the tutorial as if it had been played out.
#[derive(Event)]
pub struct TutorialSkipped;

#[derive(Resource)]
struct ForceRun(bool);

/// Drives the onboarding sequence. `force` reruns the tutorial even when a
/// completed run is already on record.
#[derive(Default)]
pub struct TutorialPlugin {
    pub force: bool,
}

impl Plugin for TutorialPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<TutorialState>()
            .init_resource::<TutorialGate>()
            .init_resource::<StepDriver>()
            .insert_resource(ForceRun(self.force))
            .add_event::<TutorialSkipped>()
            .configure_sets(
                Update,
                (DressupSet::Input, DressupSet::Act, DressupSet::React).chain(),
            )
            .add_systems(Startup, maybe_start)
            .add_systems(
                Update,
                drive_tutorial
                    .run_if(in_state(TutorialState::Running))
                    .in_set(DressupSet::React),
            );
    }
}

fn maybe_start(force: Res<ForceRun>, mut next_state: ResMut<NextState<TutorialState>>) {
    if force.0 || !persist::tutorial_completed() {
        next_state.set(TutorialState::Running);
    }
}

/// One tick of the step driver: binds the live jacket/slot, shapes the gate
/// and the prompt for the current step, and advances when the observed item
/// state matches the step's target.
fn drive_tutorial(
    mut driver: ResMut<StepDriver>,
    mut gate: ResMut<TutorialGate>,
    mut skips: EventReader<TutorialSkipped>,
    items: Query<(Entity, &DraggableItem)>,
    slots: Query<Entity, With<EquipSlot>>,
    mut messages: Query<&mut Text, With<TutorialMessageText>>,
    mut next_state: ResMut<NextState<TutorialState>>,
) {
    if skips.read().next().is_some() {
        driver.index = driver.steps.len();
    }

    let Some(step) = driver.current() else {
        finish(&mut gate, &mut next_state);
        return;
    };

    // Steps name their targets abstractly; the single jacket and torso slot
    // of the scene are bound here, at run time.
    let bound_item = items.iter().next();
    let bound_slot = slots.iter().next();

    gate.active = true;
    gate.allow_any_pick = false;
    gate.allowed_item = if step.gate_pick {
        bound_item.map(|(entity, _)| entity)
    } else {
        None
    };
    gate.allowed_slot = if step.gate_drop_on_slot {
        bound_slot
    } else {
        None
    };

    if let Ok(mut text) = messages.get_single_mut() {
        if text.0 != step.message {
            step.message.clone_into(&mut text.0);
        }
    }

    let reached = match step.target {
        StepTarget::ItemPickedUp => {
            bound_item.is_some_and(|(_, item)| item.state == ItemState::Dragging)
        }
        StepTarget::ItemEquippedAtTarget => {
            bound_item.is_some_and(|(_, item)| item.state == ItemState::Equipped)
        }
    };

    if reached {
        driver.index += 1;
        if driver.current().is_none() {
            finish(&mut gate, &mut next_state);
        }
    }
}

fn finish(gate: &mut TutorialGate, next_state: &mut NextState<TutorialState>) {
    gate.reset();
    if let Err(error) = persist::record_tutorial_completed() {
        warn!("could not record tutorial completion: {error}");
    }
    next_state.set(TutorialState::Finished);
}
