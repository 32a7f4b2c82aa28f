use bevy::prelude::*;
use bevy_asset_loader::prelude::*;
use bevy_kira_audio::prelude::*;

use crate::item::{EquipFailed, EquipSucceeded};

#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
enum AssetState {
    #[default]
    Loading,
    Loaded,
}

#[derive(AssetCollection, Resource)]
struct AudioAssets {
    #[asset(path = "audio/hit.ogg")]
    hit: Handle<bevy_kira_audio::prelude::AudioSource>,
    #[asset(path = "audio/miss.ogg")]
    miss: Handle<bevy_kira_audio::prelude::AudioSource>,
}

/// Handle of the last miss cue, so repeated failures don't restart it.
#[derive(Resource, Default)]
struct MissCue {
    instance: Option<Handle<AudioInstance>>,
}

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .init_state::<AssetState>()
            .init_resource::<MissCue>()
            .add_loading_state(
                LoadingState::new(AssetState::Loading)
                    .continue_to_state(AssetState::Loaded)
                    .load_collection::<AudioAssets>(),
            )
            .add_systems(
                Update,
                (hit_audio, miss_audio).run_if(in_state(AssetState::Loaded)),
            );
    }
}

fn hit_audio(
    audio_assets: Res<AudioAssets>,
    audio: Res<Audio>,
    mut equipped: EventReader<EquipSucceeded>,
) {
    for _ in equipped.read() {
        // The hit cue always interrupts whatever is playing.
        audio.stop();
        audio.play(audio_assets.hit.clone_weak());
    }
}

fn miss_audio(
    audio_assets: Res<AudioAssets>,
    audio: Res<Audio>,
    mut miss_cue: ResMut<MissCue>,
    instances: Res<Assets<AudioInstance>>,
    mut failed: EventReader<EquipFailed>,
) {
    for _ in failed.read() {
        let current_state = miss_cue
            .instance
            .as_ref()
            .and_then(|handle| instances.get(handle))
            .map(AudioInstance::state);
        if !should_play_miss(current_state) {
            continue;
        }
        audio.stop();
        miss_cue.instance = Some(audio.play(audio_assets.miss.clone_weak()).handle());
    }
}

/// The miss cue is idempotent: while one is still sounding, another failed
/// drop does not restart it.
fn should_play_miss(state: Option<PlaybackState>) -> bool {
    !matches!(
        state,
        Some(PlaybackState::Playing { .. } | PlaybackState::Queued)
    )
}
