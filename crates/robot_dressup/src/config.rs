use bevy::prelude::*;
use serde::Deserialize;

/// Plugin that loads the tuning values for the dress-up toy.
pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(DressupConfig::load_or_default());
    }
}

/// Resource containing all tuning values for drag/drop, highlight feedback,
/// the failure shake, the equip flourish and the idle blink.
#[derive(Resource, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DressupConfig {
    // Drop tweens
    /// Speed of the move toward the slot anchor on a successful drop.
    /// A speed of `s` means the move takes `1/s` seconds.
    pub equip_speed: f32,
    /// Speed of the move back to the origin on a failed drop
    pub return_speed: f32,

    // Highlight feedback
    /// Distance (pixels) under which the slot counts as "close"
    pub close_range: f32,
    /// Distance (pixels) under which the slot glow is visible at all
    pub visibility_range: f32,
    /// Glow floor applied to the nearest slot while an item is held
    pub baseline_on_drag: f32,
    /// Exponent (< 1) applied to the near factor; amplifies the glow as the
    /// remaining distance shrinks
    pub approach_exponent: f32,
    /// Exponent applied to the drag-progress factor
    pub progress_exponent: f32,
    /// When true the progress boost is measured against the currently
    /// nearest slot instead of the slot that was nearest at pick time
    pub progress_follows_nearest: bool,

    // Failure shake
    /// Duration of the shake played before a failed item returns (seconds)
    pub shake_duration: f32,
    /// Maximum shake offset on each axis (pixels)
    pub shake_magnitude: f32,

    // Equip flourish
    /// Duration of the scale punch on a successful equip (seconds)
    pub punch_duration: f32,
    /// Peak scale overshoot of the punch (0.1 = 110% at the apex)
    pub punch_magnitude: f32,

    // Idle blink
    /// Shortest pause between blinks (seconds)
    pub blink_interval_min: f32,
    /// Longest pause between blinks (seconds)
    pub blink_interval_max: f32,
    /// Time for the eyelids to close (seconds)
    pub blink_close_time: f32,
    /// Time the eyelids stay closed (seconds)
    pub blink_hold_time: f32,
    /// Time for the eyelids to open again (seconds)
    pub blink_open_time: f32,
}

impl Default for DressupConfig {
    fn default() -> Self {
        Self {
            equip_speed: 6.0,
            return_speed: 6.0,
            close_range: 60.0,
            visibility_range: 200.0,
            baseline_on_drag: 0.12,
            approach_exponent: 0.6,
            progress_exponent: 1.5,
            progress_follows_nearest: false,
            shake_duration: 0.1,
            shake_magnitude: 5.0,
            punch_duration: 0.25,
            punch_magnitude: 0.1,
            blink_interval_min: 2.0,
            blink_interval_max: 6.0,
            blink_close_time: 0.06,
            blink_hold_time: 0.06,
            blink_open_time: 0.08,
        }
    }
}

impl DressupConfig {
    /// Path of the optional tuning file, relative to the working directory.
    pub const FILE: &'static str = "assets/config/dressup.json";

    /// Loads the tuning file when present, falling back to the defaults on
    /// any error. A broken file is reported but never fatal.
    pub fn load_or_default() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        match std::fs::read_to_string(Self::FILE) {
            Ok(raw) => match Self::from_json(&raw) {
                Ok(config) => return config,
                Err(error) => {
                    warn!("ignoring malformed {}: {error}", Self::FILE);
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
            Err(error) => {
                warn!("could not read {}: {error}", Self::FILE);
            }
        }

        Self::default()
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
