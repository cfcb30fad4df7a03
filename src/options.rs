/*
Stagelight - by David Petnick
*/
use bevy::prelude::*;
use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::window::{
	MonitorSelection,
	PresentMode,
	PrimaryWindow,
	WindowMode,
};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::audio::GalleryMusic;

pub const SETTINGS_FILE: &str = "stagelight.ron";
pub const SETTINGS_ENV: &str = "STAGELIGHT_SETTINGS";
pub const SEED_ENV: &str = "STAGELIGHT_SEED";

pub const MUSIC_TOGGLE_KEY: KeyCode = KeyCode::KeyM;

pub struct OptionsPlugin;

impl Plugin for OptionsPlugin {
	fn build(&self, app: &mut App) {
		app
			// Loaded Up Front in main; Fall Back to Defaults for Headless Use
			.init_resource::<StageSettings>()
			.add_systems(Startup, (
				apply_video_settings_startup,
				apply_sound_settings_startup,
			))
			.add_systems(Update, (
				toggle_music,
				apply_sound_settings_on_change,
			).chain());
	}
}

//  FILE LOADING
#[derive(Debug)]
pub enum LoadError {
	Io { path: PathBuf, source: std::io::Error },
	Parse { path: PathBuf, message: String },
}

impl fmt::Display for LoadError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LoadError::Io { path, source } => {
				write!(f, "failed to read {}: {}", path.display(), source)
			}
			LoadError::Parse { path, message } => {
				write!(f, "failed to parse {}: {}", path.display(), message)
			}
		}
	}
}

impl std::error::Error for LoadError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			LoadError::Io { source, .. } => Some(source),
			LoadError::Parse { .. } => None,
		}
	}
}

/// Where a Config File Lives
/// Env Var Wins; Debug Builds use the Working Directory,
/// Release Builds the Platform Config Dir
pub fn config_path(file_name: &str, env_var: &str) -> Option<PathBuf> {
	if let Some(p) = std::env::var_os(env_var) {
		return Some(PathBuf::from(p));
	}

	#[cfg(debug_assertions)]
	{
		let mut p = std::env::current_dir().ok()?;
		p.push(file_name);
		Some(p)
	}
	#[cfg(not(debug_assertions))]
	{
		dirs::config_dir().map(|mut p| {
			p.push("Stagelight");
			p.push(file_name);
			p
		})
	}
}

pub fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
	let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	ron::from_str(&contents).map_err(|err| LoadError::Parse {
		path: path.to_path_buf(),
		message: err.to_string(),
	})
}

//  VIDEO SETTINGS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMode {
	#[default]
	Windowed,
	BorderlessFullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
	pub vsync: bool,
	pub display_mode: DisplayMode,
	/// Logical Size Used for 'Windowed' Mode
	pub resolution: (u32, u32),
}

impl Default for VideoSettings {
	fn default() -> Self {
		Self {
			vsync: true,
			display_mode: DisplayMode::default(),
			resolution: (1280, 800),
		}
	}
}

//  SOUND SETTINGS
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundSettings {
	/// Written to 'GlobalVolume'
	/// Range: 0.0 ..= 1.0
	pub master_volume: f32,
	/// Gallery Music Volume
	/// Range: 0.0 ..= 1.0
	/// Default: 0.5
	pub music_volume: f32,
	/// When False, Music Sinks Paused
	pub music_enabled: bool,
}

impl Default for SoundSettings {
	fn default() -> Self {
		Self {
			master_volume: 1.0,
			music_volume: 0.5,
			music_enabled: true,
		}
	}
}

impl SoundSettings {
	/// Linear Volume for *NEW* Music 'PlaybackSettings'
	pub fn effective_music_volume(&self) -> f32 {
		self.music_volume.clamp(0.0, 1.0)
	}
}

//  PARTICLE COUNTS (Per Screen Visit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleCounts {
	pub stars: usize,
	pub bubbles: usize,
	pub confetti: usize,
}

impl Default for ParticleCounts {
	fn default() -> Self {
		Self {
			stars: 30,
			bubbles: 20,
			confetti: 150,
		}
	}
}

//  SCREEN TEXT
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageTexts {
	pub landing_title: String,
	pub landing_subtitle: String,
	pub enter_label: String,
	pub back_label: String,
	pub gallery_heading: String,
}

impl Default for StageTexts {
	fn default() -> Self {
		Self {
			landing_title: "我和黄子".into(),
			landing_subtitle: "黄子的音乐宇宙".into(),
			enter_label: "开启黄子之旅  →".into(),
			back_label: "‹  返回".into(),
			gallery_heading: "黄子 · 璀璨时刻".into(),
		}
	}
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSettings {
	pub video: VideoSettings,
	pub sound: SoundSettings,
	pub particles: ParticleCounts,
	/// Fixed Seed for the Particle Generator
	/// None -> Fresh OS Entropy Every Launch
	pub seed: Option<u64>,
	/// Must Cover CJK Glyphs; Bevy's Built-In Font Doesn't
	pub font_path: String,
	pub texts: StageTexts,
}

impl Default for StageSettings {
	fn default() -> Self {
		Self {
			video: VideoSettings::default(),
			sound: SoundSettings::default(),
			particles: ParticleCounts::default(),
			seed: None,
			font_path: "fonts/NotoSansSC-Bold.otf".into(),
			texts: StageTexts::default(),
		}
	}
}

impl StageSettings {
	pub fn load() -> Self {
		let mut settings = match config_path(SETTINGS_FILE, SETTINGS_ENV) {
			Some(path) if path.exists() => match read_ron::<Self>(&path) {
				Ok(s) => {
					info!("settings loaded from {}", path.display());
					s
				}
				Err(err) => {
					warn!("{err}; using default settings");
					Self::default()
				}
			},
			_ => Self::default(),
		};

		if let Some(seed) = seed_from_env() {
			info!("particle seed overridden by {SEED_ENV}={seed}");
			settings.seed = Some(seed);
		}
		settings
	}
}

fn seed_from_env() -> Option<u64> {
	let raw = std::env::var(SEED_ENV).ok()?;
	parse_seed(&raw)
}

fn parse_seed(raw: &str) -> Option<u64> {
	match raw.trim().parse::<u64>() {
		Ok(seed) => Some(seed),
		Err(_) => {
			warn!("ignoring {SEED_ENV}='{raw}': not an unsigned integer");
			None
		}
	}
}

//  VIDEO: Apply Systems
fn desired_present_mode(s: &VideoSettings) -> PresentMode {
	if s.vsync {
		PresentMode::AutoVsync
	} else {
		PresentMode::AutoNoVsync
	}
}

fn desired_window_mode(s: &VideoSettings) -> WindowMode {
	match s.display_mode {
		DisplayMode::Windowed             => WindowMode::Windowed,
		DisplayMode::BorderlessFullscreen => WindowMode::BorderlessFullscreen(
			MonitorSelection::Current,
		),
	}
}

/// Run Once at Startup to Make Sure Window Matches Settings
fn apply_video_settings_startup(
	settings: Res<StageSettings>,
	mut q_window: Query<&mut Window, With<PrimaryWindow>>,
) {
	let video = &settings.video;
	if let Some(mut window) = q_window.iter_mut().next() {
		window.present_mode = desired_present_mode(video);
		window.mode = desired_window_mode(video);
		if video.display_mode == DisplayMode::Windowed {
			let (w, h) = video.resolution;
			window.resolution.set(w as f32, h as f32);
		}
	}
}

//  SOUND: Apply Systems
fn apply_sound_settings_startup(
	settings: Res<StageSettings>,
	mut global_vol: ResMut<GlobalVolume>,
) {
	global_vol.volume = Volume::Linear(settings.sound.master_volume);
}

fn toggle_music(
	keys: Res<ButtonInput<KeyCode>>,
	mut settings: ResMut<StageSettings>,
) {
	if keys.just_pressed(MUSIC_TOGGLE_KEY) {
		settings.sound.music_enabled = !settings.sound.music_enabled;
		info!("music toggled -> {}", settings.sound.music_enabled);
	}
}

/// 'master_volume'  -> 'GlobalVolume'
/// 'music_volume'   -> Every 'AudioSink' Tagged 'GalleryMusic'
/// 'music_enabled'  -> Pause / Unpause Those Sinks
fn apply_sound_settings_on_change(
	settings: Res<StageSettings>,
	mut global_vol: ResMut<GlobalVolume>,
	mut q_music: Query<&mut AudioSink, With<GalleryMusic>>,
) {
	if !settings.is_changed() {
		return;
	}

	let sound = &settings.sound;
	global_vol.volume = Volume::Linear(sound.master_volume);

	for mut sink in q_music.iter_mut() {
		sink.set_volume(Volume::Linear(sound.effective_music_volume()));
		if sound.music_enabled {
			sink.play();
		} else {
			sink.pause();
		}
	}
}
