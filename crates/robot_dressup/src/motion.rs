use bevy::ecs::system::EntityCommands;
use bevy::prelude::*;

use crate::DressupSet;
use crate::config::DressupConfig;
use crate::item::{DraggableItem, EquipSucceeded, ItemState};

/// What to do when a [`SmoothMove`] reaches its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveThen {
    /// Settle into the slot: `Equipped`, hit cue, punch flourish, reset
    /// control revealed.
    Equip,
    /// Settle at the origin: back to `Idle`.
    Return,
}

/// Eased move toward a fixed target. Inserting a new one replaces (cancels)
/// the previous move without running its completion.
#[derive(Component)]
pub struct SmoothMove {
    start: Vec2,
    target: Vec2,
    /// Interpolation parameter in [0,1]; duration of the move is `1/speed`.
    t: f32,
    speed: f32,
    then: MoveThen,
}

impl SmoothMove {
    pub fn new(start: Vec2, target: Vec2, speed: f32, then: MoveThen) -> Self {
        Self {
            start,
            target,
            t: 0.0,
            speed: speed.max(1e-4),
            then,
        }
    }

    pub const fn target(&self) -> Vec2 {
        self.target
    }
}

/// Fast start, slow finish: `1 - (1 - t)^3`.
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Random jitter that decays to nothing and restores the exact original
/// position on its final tick.
#[derive(Component)]
pub struct Shake {
    pub timer: Timer,
    pub original: Vec3,
    pub magnitude: f32,
}

impl Shake {
    pub fn new(duration: f32, magnitude: f32, original: Vec3) -> Self {
        Self {
            timer: Timer::from_seconds(duration, TimerMode::Once),
            original,
            magnitude,
        }
    }
}

/// Deferred return move: starts once the failure [`Shake`] has played out.
#[derive(Component)]
pub struct ReturnAfterShake {
    pub target: Vec2,
    pub speed: f32,
}

/// Scale flourish: `base * (1 + sin(pi * t) * magnitude)`, back to the exact
/// base scale at completion.
#[derive(Component)]
pub struct PunchScale {
    pub timer: Timer,
    pub base_scale: Vec3,
    pub magnitude: f32,
}

impl PunchScale {
    pub fn new(duration: f32, magnitude: f32, base_scale: Vec3) -> Self {
        Self {
            timer: Timer::from_seconds(duration, TimerMode::Once),
            base_scale,
            magnitude,
        }
    }
}

/// Cancels every motion on the entity without firing completions.
pub fn clear_motions(entity: &mut EntityCommands) {
    entity.remove::<(SmoothMove, Shake, ReturnAfterShake, PunchScale)>();
}

pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (DressupSet::Input, DressupSet::Act, DressupSet::React).chain(),
        )
        .add_systems(
            Update,
            (animate_shake, animate_smooth_move, animate_punch_scale)
                .chain()
                .in_set(DressupSet::React),
        );
    }
}

fn animate_smooth_move(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<DressupConfig>,
    mut movers: Query<(Entity, &mut SmoothMove, &mut Transform, &mut DraggableItem)>,
    mut equipped: EventWriter<EquipSucceeded>,
) {
    for (entity, mut movement, mut transform, mut item) in &mut movers {
        movement.t += time.delta_secs() * movement.speed;

        if movement.t < 1.0 {
            let eased = ease_out_cubic(movement.t);
            let position = movement.start.lerp(movement.target, eased);
            transform.translation.x = position.x;
            transform.translation.y = position.y;
            continue;
        }

        // Final tick snaps exactly to the target so repeated equips never
        // accumulate drift.
        transform.translation.x = movement.target.x;
        transform.translation.y = movement.target.y;
        commands.entity(entity).remove::<SmoothMove>();

        match movement.then {
            MoveThen::Equip => {
                item.state = ItemState::Equipped;
                equipped.send(EquipSucceeded { entity });
                commands.entity(entity).insert(PunchScale::new(
                    config.punch_duration,
                    config.punch_magnitude,
                    transform.scale,
                ));
            }
            MoveThen::Return => {
                item.state = ItemState::Idle;
            }
        }
    }
}

fn animate_shake(
    mut commands: Commands,
    time: Res<Time>,
    mut shakers: Query<(
        Entity,
        &mut Shake,
        &mut Transform,
        Option<&ReturnAfterShake>,
    )>,
) {
    for (entity, mut shake, mut transform, follow_up) in &mut shakers {
        shake.timer.tick(time.delta());

        if shake.timer.finished() {
            transform.translation = shake.original;
            if let Some(follow_up) = follow_up {
                let start = shake.original.truncate();
                commands.entity(entity).insert(SmoothMove::new(
                    start,
                    follow_up.target,
                    follow_up.speed,
                    MoveThen::Return,
                ));
            }
            commands.entity(entity).remove::<(Shake, ReturnAfterShake)>();
            continue;
        }

        let decay = 1.0 - shake.timer.fraction();
        let offset = Vec2::new(
            fastrand::f32().mul_add(2.0, -1.0),
            fastrand::f32().mul_add(2.0, -1.0),
        ) * (shake.magnitude * decay);
        transform.translation.x = shake.original.x + offset.x;
        transform.translation.y = shake.original.y + offset.y;
    }
}

fn animate_punch_scale(
    mut commands: Commands,
    time: Res<Time>,
    mut punchers: Query<(Entity, &mut PunchScale, &mut Transform)>,
) {
    for (entity, mut punch, mut transform) in &mut punchers {
        punch.timer.tick(time.delta());

        if punch.timer.finished() {
            transform.scale = punch.base_scale;
            commands.entity(entity).remove::<PunchScale>();
            continue;
        }

        let swell = (core::f32::consts::PI * punch.timer.fraction()).sin() * punch.magnitude;
        transform.scale = punch.base_scale * (1.0 + swell);
    }
}
