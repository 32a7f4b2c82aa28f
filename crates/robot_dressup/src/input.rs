use bevy::prelude::*;
use toy_helpers::pointer::Pointer;

use crate::DressupSet;
use crate::item::DragCommand;

pub struct DragInputPlugin;

impl Plugin for DragInputPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (DressupSet::Input, DressupSet::Act, DressupSet::React).chain(),
        )
        .add_systems(Update, pointer_commands.in_set(DressupSet::Input));
    }
}

/// Translates mouse/touch into [`DragCommand`]s in world coordinates.
/// Everything downstream (state machine, glow, tutorial) is pointer-agnostic.
pub fn pointer_commands(pointer: Pointer, mut commands: EventWriter<DragCommand>) {
    if let Some(position) = pointer.just_pressed_world() {
        commands.send(DragCommand::Pick(position));
    } else if let Some(position) = pointer.just_released_world() {
        commands.send(DragCommand::Drop(position));
    } else if let Some(position) = pointer.held_world() {
        commands.send(DragCommand::Drag(position));
    }
}
