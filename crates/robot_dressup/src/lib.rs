pub mod audio;
pub mod blink;
pub mod config;
pub mod highlight;
pub mod input;
pub mod item;
pub mod motion;
pub mod persist;
pub mod scene;
pub mod slot;
pub mod spatial;
pub mod strategy;
pub mod tutorial;
pub mod ui;

use bevy::prelude::SystemSet;

/// Frame phases of the toy: pointer translation, state-machine transitions,
/// then everything that reacts to them (motion, glow, tutorial).
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DressupSet {
    Input,
    Act,
    React,
}

pub fn run() {
    toy_helpers::get_default_app(env!("CARGO_PKG_NAME"))
        .add_plugins(config::ConfigPlugin)
        .add_plugins(scene::ScenePlugin)
        .add_plugins(item::ItemPlugin)
        .add_plugins(input::DragInputPlugin)
        .add_plugins(motion::MotionPlugin)
        .add_plugins(highlight::HighlightPlugin)
        .add_plugins(slot::SlotPlugin)
        .add_plugins(blink::BlinkPlugin)
        .add_plugins(audio::GameAudioPlugin)
        .add_plugins(ui::UiPlugin)
        .add_plugins(tutorial::TutorialPlugin::default())
        .run();
}
