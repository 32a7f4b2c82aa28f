use bevy::prelude::*;

use crate::config::DressupConfig;
use crate::item::{DraggableItem, EquipFailed, ItemState};
use crate::motion::{MoveThen, ReturnAfterShake, Shake, SmoothMove};

/// Policy applied when a dragged item is released. Two fixed policies are
/// all the toy needs, so this is plain enum dispatch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropOutcome {
    /// The drop landed on an allowed slot: glide onto its anchor.
    Equip { anchor: Vec2 },
    /// The drop missed (or the gate refused it): wiggle, then glide home.
    Return { origin: Vec2 },
}

/// Schedules the motion and side effects for `outcome`. The terminal state
/// (`Equipped` / `Idle`) is set by the motion engine when the move lands.
pub fn execute(
    commands: &mut Commands,
    entity: Entity,
    item: &mut DraggableItem,
    transform: &Transform,
    outcome: DropOutcome,
    config: &DressupConfig,
    failed: &mut EventWriter<EquipFailed>,
) {
    let position = transform.translation.truncate();

    match outcome {
        DropOutcome::Equip { anchor } => {
            item.state = ItemState::Equipping;
            commands.entity(entity).insert(SmoothMove::new(
                position,
                anchor,
                config.equip_speed,
                MoveThen::Equip,
            ));
        }
        DropOutcome::Return { origin } => {
            item.state = ItemState::Returning;
            // Miss cue fires as the return starts, not when it lands.
            failed.send(EquipFailed { entity });
            commands.entity(entity).insert((
                Shake::new(
                    config.shake_duration,
                    config.shake_magnitude,
                    transform.translation,
                ),
                ReturnAfterShake {
                    target: origin,
                    speed: config.return_speed,
                },
            ));
        }
    }
}
