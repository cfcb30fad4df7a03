/*
Stagelight - by David Petnick
*/
use bevy::prelude::*;

use stagelib::catalog::Catalog;
use stagelib::motion::{bubble_frame, star_frame};
use stagelib::options::StageSettings;
use stagelib::particles::{Bubble, Star};
use stagelib::scene::{LandingScene, SceneClock};
use stagelib::view::{ViewAction, ViewState};

use super::{full_cover, nav_button_color, text_font};

const NIGHT: Color = Color::srgb(0.059, 0.090, 0.165); // #0f172a
const BUBBLE_FILL: Color = Color::srgba(0.647, 0.953, 0.988, 0.2); // cyan-200/20
const TITLE_GLOW: Color = Color::srgb(0.80, 0.97, 1.0);

#[derive(Component)]
pub(super) struct StarDot(Star);

#[derive(Component)]
pub(super) struct BubbleDot(Bubble);

#[derive(Component)]
pub(super) struct EnterButton;

pub(super) fn spawn_landing(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    catalog: Res<Catalog>,
    settings: Res<StageSettings>,
    scene: Res<LandingScene>,
) {
    let font: Handle<Font> = asset_server.load(settings.font_path.clone());
    let background: Handle<Image> = asset_server.load(catalog.landing_background.clone());
    let texts = &settings.texts;

    commands
        .spawn((
            Name::new("landing"),
            DespawnOnExit(ViewState::Landing),
            full_cover(),
            BackgroundColor(NIGHT),
        ))
        .with_children(|root| {
            // Layer 0: Backdrop + Darken + Bottom Haze
            root.spawn((ImageNode::new(background), full_cover()));
            root.spawn((full_cover(), BackgroundColor(NIGHT.with_alpha(0.4))));
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(0.0),
                    bottom: Val::Px(0.0),
                    width: Val::Percent(100.0),
                    height: Val::Percent(45.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.118, 0.106, 0.294, 0.6)),
            ));

            // Soft Corner Glows
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    right: Val::Px(-80.0),
                    top: Val::Px(-80.0),
                    width: Val::Px(384.0),
                    height: Val::Px(384.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.66, 0.33, 0.97, 0.08)),
            ));
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(-80.0),
                    bottom: Val::Px(-80.0),
                    width: Val::Px(320.0),
                    height: Val::Px(320.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.23, 0.51, 0.96, 0.08)),
            ));

            // Layer 1: Stars + Bubbles
            for star in &scene.stars {
                root.spawn((
                    StarDot(star.clone()),
                    ZIndex(10),
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Percent(star.x),
                        top: Val::Percent(star.y),
                        width: Val::Px(star.size_px),
                        height: Val::Px(star.size_px),
                        ..default()
                    },
                    BackgroundColor(Color::WHITE.with_alpha(0.2)),
                ));
            }

            for bubble in &scene.bubbles {
                let d = bubble.diameter_px();
                root.spawn((
                    BubbleDot(bubble.clone()),
                    ZIndex(10),
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Percent(bubble.x),
                        bottom: Val::Percent(-10.0),
                        width: Val::Px(d),
                        height: Val::Px(d),
                        ..default()
                    },
                    BackgroundColor(BUBBLE_FILL.with_alpha(0.0)),
                ));
            }

            // Layer 2: Title Block + Call to Action
            root.spawn((
                ZIndex(20),
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    flex_direction: FlexDirection::Column,
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(18.0),
                    ..default()
                },
            ))
            .with_children(|col| {
                col.spawn((
                    Text::new(texts.landing_title.clone()),
                    text_font(&font, 96.0),
                    TextColor(TITLE_GLOW),
                ));
                col.spawn((
                    Node {
                        width: Val::Px(420.0),
                        height: Val::Px(3.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.13, 0.83, 0.93, 0.8)),
                ));
                col.spawn((
                    Text::new(texts.landing_subtitle.clone()),
                    text_font(&font, 26.0),
                    TextColor(Color::srgb(0.81, 0.98, 1.0)),
                    Node {
                        margin: UiRect::bottom(Val::Px(48.0)),
                        ..default()
                    },
                ));
                col.spawn((
                    EnterButton,
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(64.0), Val::Px(20.0)),
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                    BackgroundColor(nav_button_color(Interaction::None)),
                ))
                .with_children(|b| {
                    b.spawn((
                        Text::new(texts.enter_label.clone()),
                        text_font(&font, 24.0),
                        TextColor(Color::WHITE),
                    ));
                });
            });
        });
}

pub(super) fn enter_button(
    mut q: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<EnterButton>)>,
    mut actions: MessageWriter<ViewAction>,
) {
    for (interaction, mut bg) in q.iter_mut() {
        bg.0 = nav_button_color(*interaction);
        if *interaction == Interaction::Pressed {
            actions.write(ViewAction::Enter);
        }
    }
}

pub(super) fn animate_stars(
    time: Res<Time>,
    clock: Option<Res<SceneClock>>,
    mut q: Query<(&StarDot, &mut Node, &mut BackgroundColor)>,
) {
    let Some(clock) = clock else {
        return;
    };
    let t = clock.local(time.elapsed_secs());

    for (dot, mut node, mut bg) in q.iter_mut() {
        let f = star_frame(&dot.0, t);
        let size = dot.0.size_px * f.scale;
        node.width = Val::Px(size);
        node.height = Val::Px(size);
        bg.0 = Color::WHITE.with_alpha(f.opacity);
    }
}

pub(super) fn animate_bubbles(
    time: Res<Time>,
    clock: Option<Res<SceneClock>>,
    mut q: Query<(&BubbleDot, &mut Node, &mut BackgroundColor)>,
) {
    let Some(clock) = clock else {
        return;
    };
    let t = clock.local(time.elapsed_secs());

    for (dot, mut node, mut bg) in q.iter_mut() {
        let f = bubble_frame(&dot.0, t);
        node.bottom = Val::Percent(f.bottom);
        node.margin.left = Val::Px(f.sway_px);
        bg.0 = BUBBLE_FILL.with_alpha(0.2 * f.opacity / 0.8);
    }
}
