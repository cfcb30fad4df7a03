/*
Stagelight - by David Petnick
*/
use bevy::log::LogPlugin;
use bevy::prelude::*;
use stagelib::audio::StageAudioPlugin;
use stagelib::catalog::Catalog;
use stagelib::options::{OptionsPlugin, StageSettings};
use stagelib::scene::ScenePlugin;
use stagelib::view::ViewPlugin;

mod ui;

const LOG_FILTER: &str = "wgpu=error,naga=warn,stagelib=info,Stagelight=info";

fn main() {
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Stagelight".into(),
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter: LOG_FILTER.into(),
                ..default()
            }),
    );

    // Logging is live from here on, so file loading can report what it finds
    app.insert_resource(StageSettings::load())
        .insert_resource(Catalog::load())
        .add_plugins((OptionsPlugin, ViewPlugin, ScenePlugin, StageAudioPlugin, ui::UiPlugin))
        .run();
}
