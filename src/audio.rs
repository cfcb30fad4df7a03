/*
Stagelight - by David Petnick
*/
use bevy::prelude::*;
use bevy::asset::LoadState;
use bevy::audio::{
	AudioPlayer,
	AudioSink,
	AudioSinkPlayback,
	AudioSource,
	PlaybackSettings,
	Volume,
};

use crate::catalog::Catalog;
use crate::options::StageSettings;
use crate::view::ViewState;

/// Give Up Watching After This; Playback Isn't Retried Either Way
const AUTOPLAY_WATCH_SECS: f32 = 5.0;

#[derive(Component)]
pub struct GalleryMusic;

/// Present Until the Autoplay Attempt Resolves
#[derive(Component)]
pub struct AutoplayWatch {
	timer: Timer,
}

impl Default for AutoplayWatch {
	fn default() -> Self {
		Self {
			timer: Timer::from_seconds(AUTOPLAY_WATCH_SECS, TimerMode::Once),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AutoplayOutcome {
	Pending,
	Started,
	/// Sink Exists but Music is Switched Off in Settings
	ReadyPaused,
	Blocked(String),
}

/// Classify an Attempt From What Bevy Exposes: a Sink Appears Once
/// Playback Begins, a Failed Load Means it Never Will.
/// 'sink_paused' is None Until the Sink Exists
pub fn autoplay_outcome(load: Option<&LoadState>, sink_paused: Option<bool>) -> AutoplayOutcome {
	match sink_paused {
		Some(false) => return AutoplayOutcome::Started,
		Some(true) => return AutoplayOutcome::ReadyPaused,
		None => {}
	}
	match load {
		Some(LoadState::Failed(err)) => AutoplayOutcome::Blocked(err.to_string()),
		_ => AutoplayOutcome::Pending,
	}
}

pub struct StageAudioPlugin;

impl Plugin for StageAudioPlugin {
	fn build(&self, app: &mut App) {
		app.add_systems(OnEnter(ViewState::Gallery), start_gallery_music)
			.add_systems(Update, watch_music_autoplay.run_if(in_state(ViewState::Gallery)));
	}
}

/// Fire-and-Forget: Spawn the Looping Player, Let the Watcher Report
pub fn start_gallery_music(
	mut commands: Commands,
	asset_server: Res<AssetServer>,
	catalog: Res<Catalog>,
	settings: Res<StageSettings>,
) {
	// Same Path Every Visit, so the Asset Server Hands Back the Cached Handle
	let music: Handle<AudioSource> = asset_server.load(catalog.music.clone());
	let sound = &settings.sound;
	let mut playback = PlaybackSettings::LOOP.with_volume(Volume::Linear(sound.effective_music_volume()));
	playback.paused = !sound.music_enabled;

	commands.spawn((
		Name::new("gallery_music"),
		GalleryMusic,
		DespawnOnExit(ViewState::Gallery),
		AutoplayWatch::default(),
		AudioPlayer::new(music),
		playback,
	));
}

fn watch_music_autoplay(
	mut commands: Commands,
	time: Res<Time>,
	asset_server: Res<AssetServer>,
	mut q: Query<(Entity, &AudioPlayer, Option<&AudioSink>, &mut AutoplayWatch), With<GalleryMusic>>,
) {
	for (e, player, sink, mut watch) in q.iter_mut() {
		let load = asset_server.get_load_state(player.0.id());
		match autoplay_outcome(load.as_ref(), sink.map(|s| s.is_paused())) {
			AutoplayOutcome::Started => {
				info!("gallery music playing");
			}
			AutoplayOutcome::ReadyPaused => {
				info!("gallery music ready (paused, music disabled)");
			}
			AutoplayOutcome::Blocked(reason) => {
				warn!("gallery music blocked: {reason}");
			}
			AutoplayOutcome::Pending => {
				watch.timer.tick(time.delta());
				if !watch.timer.is_finished() {
					continue;
				}
				warn!("gallery music did not start within {AUTOPLAY_WATCH_SECS}s (no audio output?)");
			}
		}
		commands.entity(e).remove::<AutoplayWatch>();
	}
}
