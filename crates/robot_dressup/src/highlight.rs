use bevy::prelude::*;

use crate::DressupSet;
use crate::config::DressupConfig;
use crate::item::{DraggableItem, ItemDropped, ItemPicked, ItemState, ResetRequested};
use crate::slot::{EquipSlot, SlotHighlight};
use crate::spatial;

/// Session-scoped hover bookkeeping for the proximity glow.
///
/// This is feedback only: the equip/return decision on drop runs its own
/// point query and never consults this resource.
#[derive(Resource, Default)]
pub struct HoverState {
    /// Slot currently owning the glow.
    pub slot: Option<Entity>,
    /// Slot the drag-progress boost is measured against, fixed at pick time
    /// unless `progress_follows_nearest` is set.
    pub primary: Option<Entity>,
    /// Distance from the item to the primary slot when it was picked.
    pub distance_at_pick: f32,
}

pub struct HighlightPlugin;

impl Plugin for HighlightPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoverState>()
            .configure_sets(
                Update,
                (DressupSet::Input, DressupSet::Act, DressupSet::React).chain(),
            )
            .add_systems(
                Update,
                (begin_hover, update_hover, clear_hover)
                    .chain()
                    .in_set(DressupSet::React),
            );
    }
}

/// Blends the near/far distance signal and the drag progress into one glow
/// intensity in [0,1].
pub fn highlight_level(
    nearest_distance: f32,
    primary_distance: f32,
    distance_at_pick: f32,
    config: &DressupConfig,
) -> f32 {
    let close_range = config.close_range.max(1e-4);
    let near_factor = (1.0 - nearest_distance / close_range).clamp(0.0, 1.0);
    let approach_boost = near_factor.powf(config.approach_exponent);

    let progress = if distance_at_pick > 0.0 {
        (1.0 - primary_distance / distance_at_pick).clamp(0.0, 1.0)
    } else if primary_distance <= 0.0 {
        // Picked up while already touching the primary slot, and still there.
        1.0
    } else {
        0.0
    };
    let progress_boost = progress.powf(config.progress_exponent);

    // The held-item floor fades with distance and is gone entirely once the
    // slot is out of sight.
    let visibility_range = config.visibility_range.max(1e-4);
    let far_factor = (1.0 - nearest_distance / visibility_range).clamp(0.0, 1.0);
    let baseline = config.baseline_on_drag * far_factor;

    baseline
        .max(approach_boost)
        .max(progress_boost)
        .clamp(0.0, 1.0)
}

/// Captures the primary slot and its distance the moment an item is picked.
fn begin_hover(
    mut hover: ResMut<HoverState>,
    mut picked: EventReader<ItemPicked>,
    config: Res<DressupConfig>,
    items: Query<(&DraggableItem, &Transform)>,
    slots: Query<(Entity, &EquipSlot, &Transform)>,
) {
    for event in picked.read() {
        let Ok((item, transform)) = items.get(event.entity) else {
            continue;
        };
        let shape = item.aabb(transform);
        match spatial::nearest_region(
            &shape,
            slots
                .iter()
                .map(|(entity, slot, slot_transform)| (entity, slot.aabb(slot_transform))),
        ) {
            Some((slot, distance)) => {
                hover.primary = Some(slot);
                // Progress feedback starts counting once the slot is in
                // sight, so a pick on the far side of the screen does not
                // dilute the whole approach.
                hover.distance_at_pick = distance.min(config.visibility_range);
            }
            None => {
                hover.primary = None;
                hover.distance_at_pick = 0.0;
            }
        }
    }
}

/// Per-tick glow update while an item is held.
fn update_hover(
    mut hover: ResMut<HoverState>,
    config: Res<DressupConfig>,
    items: Query<(&DraggableItem, &Transform)>,
    slots: Query<(Entity, &EquipSlot, &Transform)>,
    mut highlights: Query<&mut SlotHighlight>,
) {
    let Some((item, transform)) = items
        .iter()
        .find(|(item, _)| item.state == ItemState::Dragging)
    else {
        return;
    };

    let shape = item.aabb(transform);
    let boxes: Vec<_> = slots
        .iter()
        .map(|(entity, slot, slot_transform)| (entity, slot.aabb(slot_transform)))
        .collect();

    let Some((nearest, nearest_distance)) = spatial::nearest_region(&shape, boxes.iter().copied())
    else {
        return;
    };

    let primary = if config.progress_follows_nearest {
        Some(nearest)
    } else {
        hover.primary
    };
    let primary_distance = primary
        .and_then(|slot| {
            boxes
                .iter()
                .find(|(entity, _)| *entity == slot)
                .map(|(_, aabb)| {
                    let (overlapping, distance) = shape.separation(aabb);
                    if overlapping { 0.0 } else { distance }
                })
        })
        .unwrap_or(nearest_distance);

    let level = highlight_level(
        nearest_distance,
        primary_distance,
        hover.distance_at_pick,
        &config,
    );

    // The outgoing slot is forced dark before the new one lights up, in the
    // same update, so two slots never glow at once.
    if hover.slot != Some(nearest) {
        if let Some(previous) = hover.slot {
            if let Ok(mut highlight) = highlights.get_mut(previous) {
                highlight.level = 0.0;
                highlight.on_top = false;
            }
        }
        hover.slot = Some(nearest);
    }

    if let Ok(mut highlight) = highlights.get_mut(nearest) {
        highlight.level = level;
        highlight.on_top = level > 0.0;
    }
}

/// Puts the glow out when the drag ends or the scene is reset.
fn clear_hover(
    mut hover: ResMut<HoverState>,
    mut dropped: EventReader<ItemDropped>,
    mut resets: EventReader<ResetRequested>,
    mut highlights: Query<&mut SlotHighlight>,
) {
    if dropped.read().next().is_none() && resets.read().next().is_none() {
        return;
    }

    if let Some(slot) = hover.slot.take() {
        if let Ok(mut highlight) = highlights.get_mut(slot) {
            highlight.level = 0.0;
            highlight.on_top = false;
        }
    }
    hover.primary = None;
    hover.distance_at_pick = 0.0;
}
