use bevy::prelude::*;

use crate::config::DressupConfig;

/// Tick-driven replacement for a blink coroutine: wait a random interval,
/// close, hold, open, repeat.
#[derive(Component)]
pub struct Blinker {
    phase: BlinkPhase,
    timer: Timer,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum BlinkPhase {
    Waiting,
    Closing,
    Closed,
    Opening,
}

impl Blinker {
    pub fn new(config: &DressupConfig) -> Self {
        Self {
            phase: BlinkPhase::Waiting,
            timer: Timer::from_seconds(wait_interval(config), TimerMode::Once),
        }
    }

    /// Eyelid coverage in [0,1] for the current phase.
    fn coverage(&self) -> f32 {
        match self.phase {
            BlinkPhase::Waiting => 0.0,
            BlinkPhase::Closing => self.timer.fraction(),
            BlinkPhase::Closed => 1.0,
            BlinkPhase::Opening => 1.0 - self.timer.fraction(),
        }
    }
}

fn wait_interval(config: &DressupConfig) -> f32 {
    let span = (config.blink_interval_max - config.blink_interval_min).max(0.0);
    fastrand::f32().mul_add(span, config.blink_interval_min)
}

/// Eyelid sprite, a child of the blinking face. Top anchored: it grows
/// downward from `anchor` as the eye closes.
#[derive(Component)]
pub struct Eyelid {
    pub anchor: Vec2,
    pub width: f32,
    pub closed_height: f32,
}

pub struct BlinkPlugin;

impl Plugin for BlinkPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, blink);
    }
}

fn blink(
    time: Res<Time>,
    config: Res<DressupConfig>,
    mut blinkers: Query<(&mut Blinker, &Children)>,
    mut eyelids: Query<(&Eyelid, &mut Transform)>,
) {
    for (mut blinker, children) in &mut blinkers {
        blinker.timer.tick(time.delta());

        if blinker.timer.finished() {
            let (next_phase, duration) = match blinker.phase {
                BlinkPhase::Waiting => (BlinkPhase::Closing, config.blink_close_time),
                BlinkPhase::Closing => (BlinkPhase::Closed, config.blink_hold_time),
                BlinkPhase::Closed => (BlinkPhase::Opening, config.blink_open_time),
                BlinkPhase::Opening => (BlinkPhase::Waiting, wait_interval(&config)),
            };
            blinker.phase = next_phase;
            blinker.timer = Timer::from_seconds(duration.max(1e-3), TimerMode::Once);
        }

        let coverage = blinker.coverage();
        for &child in children {
            let Ok((eyelid, mut transform)) = eyelids.get_mut(child) else {
                continue;
            };
            let height = (eyelid.closed_height * coverage).max(1e-3);
            transform.translation.x = eyelid.anchor.x;
            transform.translation.y = eyelid.anchor.y - height / 2.0;
            transform.scale = Vec3::new(eyelid.width, height, 1.0);
        }
    }
}
