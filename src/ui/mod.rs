use bevy::prelude::*;
use stagelib::scene::{begin_gallery, begin_landing};
use stagelib::view::ViewState;

mod gallery;
mod landing;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            // Scene state must exist before the node tree reads it
            .add_systems(OnEnter(ViewState::Landing), landing::spawn_landing.after(begin_landing))
            .add_systems(OnEnter(ViewState::Gallery), gallery::spawn_gallery.after(begin_gallery))
            .add_systems(
                Update,
                (
                    landing::enter_button,
                    landing::animate_stars,
                    landing::animate_bubbles,
                )
                    .run_if(in_state(ViewState::Landing)),
            )
            .add_systems(
                Update,
                (
                    gallery::back_button,
                    gallery::hover_panels,
                    gallery::sync_panels.after(gallery::hover_panels),
                    gallery::animate_confetti,
                )
                    .run_if(in_state(ViewState::Gallery)),
            );
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("ui_camera"), Camera2d));
}

/// Absolute Node Covering its Parent
pub(crate) fn full_cover() -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(0.0),
        top: Val::Px(0.0),
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        ..default()
    }
}

pub(crate) fn text_font(font: &Handle<Font>, font_size: f32) -> TextFont {
    TextFont {
        font: font.clone(),
        font_size,
        ..default()
    }
}

/// Shared Hover Look for the Landing/Gallery Nav Buttons
pub(crate) fn nav_button_color(interaction: Interaction) -> Color {
    match interaction {
        Interaction::Pressed => Color::srgba(1.0, 1.0, 1.0, 0.30),
        Interaction::Hovered => Color::srgba(1.0, 1.0, 1.0, 0.20),
        Interaction::None => Color::srgba(1.0, 1.0, 1.0, 0.10),
    }
}
