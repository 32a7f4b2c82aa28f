use bevy::prelude::*;

use crate::config::DressupConfig;
use crate::motion::{self, PunchScale, Shake};
use crate::slot::EquipSlot;
use crate::spatial::{self, Aabb};
use crate::strategy::{self, DropOutcome};
use crate::DressupSet;
use crate::tutorial::TutorialGate;

/// Lifecycle of a draggable piece of clothing.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ItemState {
    #[default]
    Idle,
    Dragging,
    Returning,
    Equipping,
    Equipped,
}

/// A piece of clothing the player can drag onto the robot.
#[derive(Component)]
pub struct DraggableItem {
    pub state: ItemState,
    /// Resting position the item returns to after a failed drop.
    /// `None` means "stay where you are".
    pub origin: Option<Vec2>,
    /// Vector from the pointer to the item center, captured on pick, so the
    /// item does not jump under the finger.
    pub pick_offset: Vec2,
    /// Half size of the item's collision box.
    pub half_extents: Vec2,
}

impl DraggableItem {
    pub fn new(origin: Vec2, half_extents: Vec2) -> Self {
        Self {
            state: ItemState::Idle,
            origin: Some(origin),
            pick_offset: Vec2::ZERO,
            half_extents,
        }
    }

    pub fn aabb(&self, transform: &Transform) -> Aabb {
        Aabb::new(transform.translation.truncate(), self.half_extents)
    }
}

/// Pointer gestures in world coordinates, the only way the state machine is
/// driven. The input layer translates mouse/touch into these.
#[derive(Event, Clone, Copy, Debug)]
pub enum DragCommand {
    Pick(Vec2),
    Drag(Vec2),
    Drop(Vec2),
}

#[derive(Event)]
pub struct ItemPicked {
    pub entity: Entity,
}

#[derive(Event)]
pub struct ItemDropped {
    pub entity: Entity,
}

/// An item finished its move onto the slot anchor.
#[derive(Event)]
pub struct EquipSucceeded {
    pub entity: Entity,
}

/// A drop missed (or was denied) and the item is heading back.
#[derive(Event)]
pub struct EquipFailed {
    pub entity: Entity,
}

/// Request to snap everything back to the initial pose.
#[derive(Event)]
pub struct ResetRequested;

pub struct ItemPlugin;

impl Plugin for ItemPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DragCommand>()
            .add_event::<ItemPicked>()
            .add_event::<ItemDropped>()
            .add_event::<EquipSucceeded>()
            .add_event::<EquipFailed>()
            .add_event::<ResetRequested>()
            .configure_sets(
                Update,
                (DressupSet::Input, DressupSet::Act, DressupSet::React).chain(),
            )
            .add_systems(
                Update,
                (apply_drag_commands, handle_reset)
                    .chain()
                    .in_set(DressupSet::Act),
            );
    }
}

/// Executes pick/drag/drop transitions. Commands that do not match the
/// current state are dropped silently: duplicate or stale pointer events are
/// normal, not errors.
pub fn apply_drag_commands(
    mut commands: Commands,
    mut drag_commands: EventReader<DragCommand>,
    gate: Res<TutorialGate>,
    config: Res<DressupConfig>,
    mut items: Query<(Entity, &mut DraggableItem, &mut Transform)>,
    slots: Query<(Entity, &EquipSlot, &Transform), Without<DraggableItem>>,
    mut picked: EventWriter<ItemPicked>,
    mut dropped: EventWriter<ItemDropped>,
    mut failed: EventWriter<EquipFailed>,
) {
    for command in drag_commands.read() {
        match *command {
            DragCommand::Pick(pointer) => {
                let Some(entity) = pickable_item_at(pointer, &items) else {
                    continue;
                };
                if !gate.allow_pick(entity) {
                    continue;
                }
                let Ok((entity, mut item, transform)) = items.get_mut(entity) else {
                    continue;
                };
                motion::clear_motions(&mut commands.entity(entity));
                item.pick_offset = transform.translation.truncate() - pointer;
                item.state = ItemState::Dragging;
                picked.send(ItemPicked { entity });
            }
            DragCommand::Drag(pointer) => {
                for (_, item, mut transform) in &mut items {
                    if item.state != ItemState::Dragging {
                        continue;
                    }
                    let position = pointer + item.pick_offset;
                    transform.translation.x = position.x;
                    transform.translation.y = position.y;
                }
            }
            DragCommand::Drop(pointer) => {
                for (entity, mut item, transform) in &mut items {
                    if item.state != ItemState::Dragging {
                        continue;
                    }
                    let slot_hit = spatial::region_at_point(
                        pointer,
                        slots.iter().map(|(slot_entity, slot, slot_transform)| {
                            (
                                slot_entity,
                                slot.aabb(slot_transform),
                                slot_transform.translation.z,
                            )
                        }),
                    );

                    // A gate denial falls through to the return path, same as
                    // missing the slot entirely.
                    let outcome = match slot_hit.filter(|hit| gate.allow_drop(Some(*hit))) {
                        Some(hit) => {
                            let anchor = slots
                                .get(hit)
                                .map(|(_, slot, slot_transform)| slot.anchor_position(slot_transform))
                                .unwrap_or_else(|_| transform.translation.truncate());
                            DropOutcome::Equip { anchor }
                        }
                        None => DropOutcome::Return {
                            origin: item
                                .origin
                                .unwrap_or_else(|| transform.translation.truncate()),
                        },
                    };

                    strategy::execute(
                        &mut commands,
                        entity,
                        &mut item,
                        &*transform,
                        outcome,
                        &config,
                        &mut failed,
                    );
                    dropped.send(ItemDropped { entity });
                }
            }
        }
    }
}

/// Topmost idle item whose collision box contains `point`.
fn pickable_item_at(
    point: Vec2,
    items: &Query<(Entity, &mut DraggableItem, &mut Transform)>,
) -> Option<Entity> {
    items
        .iter()
        .filter(|(_, item, transform)| {
            item.state == ItemState::Idle && item.aabb(transform).contains(point)
        })
        .max_by(|(_, _, ta), (_, _, tb)| ta.translation.z.total_cmp(&tb.translation.z))
        .map(|(entity, _, _)| entity)
}

/// Snaps every item back to its origin, from any state, cancelling whatever
/// motion is in flight. Must be safe mid-shake and mid-move.
pub fn handle_reset(
    mut commands: Commands,
    mut reset_events: EventReader<ResetRequested>,
    mut items: Query<(
        Entity,
        &mut DraggableItem,
        &mut Transform,
        Option<&Shake>,
        Option<&PunchScale>,
    )>,
) {
    if reset_events.read().next().is_none() {
        return;
    }

    for (entity, mut item, mut transform, shake, punch) in &mut items {
        motion::clear_motions(&mut commands.entity(entity));
        if let Some(shake) = shake {
            transform.translation = shake.original;
        }
        if let Some(punch) = punch {
            transform.scale = punch.base_scale;
        }
        let target = item
            .origin
            .unwrap_or_else(|| transform.translation.truncate());
        transform.translation.x = target.x;
        transform.translation.y = target.y;
        item.state = ItemState::Idle;
        item.pick_offset = Vec2::ZERO;
    }
}
