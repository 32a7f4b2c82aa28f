use bevy::prelude::*;

use crate::spatial::Aabb;

/// How far the glow overlay is lifted when a slot is flagged draw-on-top.
const ON_TOP_Z_BOOST: f32 = 50.0;

/// A region that accepts a dropped item and provides the snap anchor.
#[derive(Component)]
pub struct EquipSlot {
    /// Exact point items snap to. `None` falls back to the slot's own
    /// position.
    pub anchor: Option<Vec2>,
    /// Glow opacity at full highlight; the live level scales this down.
    pub glow_alpha: f32,
    /// Half size of the slot's collision box.
    pub half_extents: Vec2,
}

impl EquipSlot {
    pub fn new(half_extents: Vec2) -> Self {
        Self {
            anchor: None,
            glow_alpha: 0.85,
            half_extents,
        }
    }

    pub const fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn anchor_position(&self, transform: &Transform) -> Vec2 {
        self.anchor
            .unwrap_or_else(|| transform.translation.truncate())
    }

    pub fn aabb(&self, transform: &Transform) -> Aabb {
        Aabb::new(transform.translation.truncate(), self.half_extents)
    }
}

/// Live feedback state of a slot. Written only by the highlight systems.
#[derive(Component, Default)]
pub struct SlotHighlight {
    /// Glow intensity in [0,1]; 0 disables the overlay entirely.
    pub level: f32,
    /// Lifts the glow above sibling sprites while set.
    pub on_top: bool,
}

/// Marker for the glow overlay child sprite of a slot.
#[derive(Component)]
pub struct SlotGlow {
    pub base_z: f32,
}

pub struct SlotPlugin;

impl Plugin for SlotPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, apply_highlight);
    }
}

/// Pushes the highlight state of each slot into its glow overlay sprite.
fn apply_highlight(
    slots: Query<(&EquipSlot, &SlotHighlight, &Children), Changed<SlotHighlight>>,
    mut glows: Query<(&SlotGlow, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    for (slot, highlight, children) in &slots {
        for &child in children {
            let Ok((glow, mut sprite, mut transform, mut visibility)) = glows.get_mut(child)
            else {
                continue;
            };

            if highlight.level <= 0.0 {
                *visibility = Visibility::Hidden;
            } else {
                // Alpha only; the glow color itself stays fixed.
                let alpha = (slot.glow_alpha * highlight.level).clamp(0.0, 1.0);
                sprite.color.set_alpha(alpha);
                *visibility = Visibility::Visible;
            }

            transform.translation.z = if highlight.on_top {
                glow.base_z + ON_TOP_Z_BOOST
            } else {
                glow.base_z
            };
        }
    }
}
