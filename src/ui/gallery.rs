/*
Stagelight - by David Petnick
*/
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use stagelib::accordion::{ActiveSelection, ItemWeight, PanelMotion, layout};
use stagelib::catalog::{Catalog, GalleryImage};
use stagelib::motion::confetti_frame;
use stagelib::options::StageSettings;
use stagelib::particles::ConfettiPiece;
use stagelib::scene::{GalleryScene, SceneClock};
use stagelib::view::{ViewAction, ViewState};

use super::{full_cover, nav_button_color, text_font};

const NIGHT: Color = Color::srgb(0.059, 0.090, 0.165);

/// Panels Reach ~95% of a New Target in a Quarter Second
const PANEL_EASE_RATE: f32 = 12.0;

/// Confetti Starts Above the Top Edge and Ends Past the Bottom (Percent)
const CONFETTI_TOP_START: f32 = -6.0;
const CONFETTI_TOP_END: f32 = 110.0;

#[derive(Component)]
pub(super) struct BackButton;

#[derive(Component)]
pub(super) struct ConfettiBit(ConfettiPiece);

#[derive(Component)]
pub(super) struct Panel {
    index: usize,
    id: String,
    motion: PanelMotion,
}

#[derive(Component)]
pub(super) struct PanelImage {
    index: usize,
}

#[derive(Component)]
pub(super) struct PanelCaption {
    index: usize,
}

#[derive(Component)]
pub(super) struct PanelSpine {
    index: usize,
}

/// Stack Characters So a Collapsed Panel Reads Top-to-Bottom
fn vertical_title(title: &str) -> String {
    title.chars().map(String::from).collect::<Vec<_>>().join("\n")
}

fn zoomed_image_node(zoom: f32) -> Node {
    let overflow = (zoom - 1.0) * 50.0;
    Node {
        position_type: PositionType::Absolute,
        left: Val::Percent(-overflow),
        top: Val::Percent(-overflow),
        width: Val::Percent(zoom * 100.0),
        height: Val::Percent(zoom * 100.0),
        ..default()
    }
}

fn visibility(shown: bool) -> Visibility {
    if shown { Visibility::Inherited } else { Visibility::Hidden }
}

pub(super) fn spawn_gallery(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    catalog: Res<Catalog>,
    settings: Res<StageSettings>,
    selection: Res<ActiveSelection>,
    scene: Res<GalleryScene>,
) {
    let font: Handle<Font> = asset_server.load(settings.font_path.clone());
    let background: Handle<Image> = asset_server.load(catalog.gallery_background.clone());
    let weights = layout(&catalog.images, selection.id());
    let texts = &settings.texts;

    commands
        .spawn((
            Name::new("gallery"),
            DespawnOnExit(ViewState::Gallery),
            full_cover(),
            BackgroundColor(NIGHT),
        ))
        .with_children(|root| {
            // Layer 1: Backdrop + Stage Lighting
            root.spawn((ImageNode::new(background), full_cover()));
            root.spawn((full_cover(), BackgroundColor(Color::BLACK.with_alpha(0.5))));
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(0.0),
                    top: Val::Px(0.0),
                    width: Val::Percent(100.0),
                    height: Val::Percent(35.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.92, 0.70, 0.03, 0.08)),
            ));
            root.spawn((full_cover(), BackgroundColor(Color::srgba(0.35, 0.11, 0.53, 0.08))));

            // Layer 2: Header + Accordion
            root.spawn((
                ZIndex(20),
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    flex_direction: FlexDirection::Column,
                    ..default()
                },
            ))
            .with_children(|col| {
                spawn_header(col, &font, &texts.back_label, &texts.gallery_heading);

                col.spawn(Node {
                    flex_grow: 1.0,
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    padding: UiRect::new(Val::Px(48.0), Val::Px(48.0), Val::Px(0.0), Val::Px(48.0)),
                    ..default()
                })
                .with_children(|area| {
                    area.spawn(Node {
                        width: Val::Percent(100.0),
                        max_width: Val::Px(1800.0),
                        height: Val::Percent(90.0),
                        column_gap: Val::Px(8.0),
                        ..default()
                    })
                    .with_children(|row| {
                        for (index, (image, weight)) in catalog.images.iter().zip(&weights).enumerate() {
                            spawn_panel(row, &asset_server, &font, index, image, weight);
                        }
                    });
                });
            });

            // Layer 3: Confetti Above Everything
            root.spawn((full_cover(), ZIndex(30)))
                .with_children(|layer| {
                    for piece in &scene.confetti {
                        layer.spawn((
                            ConfettiBit(piece.clone()),
                            Node {
                                position_type: PositionType::Absolute,
                                left: Val::Percent(piece.x),
                                top: Val::Percent(CONFETTI_TOP_START),
                                width: Val::Px(piece.width),
                                height: Val::Px(piece.height),
                                ..default()
                            },
                            BackgroundColor(Color::from(piece.color).with_alpha(0.0)),
                            Outline::new(Val::Px(2.0), Val::ZERO, Color::from(piece.glow)),
                            Visibility::Hidden,
                        ));
                    }
                });
        });
}

fn spawn_header(col: &mut ChildSpawnerCommands, font: &Handle<Font>, back_label: &str, heading: &str) {
    col.spawn(Node {
        width: Val::Percent(100.0),
        padding: UiRect::all(Val::Px(24.0)),
        justify_content: JustifyContent::SpaceBetween,
        align_items: AlignItems::Center,
        ..default()
    })
    .with_children(|header| {
        header
            .spawn((
                BackButton,
                Button,
                Node {
                    padding: UiRect::axes(Val::Px(14.0), Val::Px(6.0)),
                    ..default()
                },
                BackgroundColor(nav_button_color(Interaction::None)),
            ))
            .with_children(|b| {
                b.spawn((
                    Text::new(back_label.to_owned()),
                    text_font(font, 16.0),
                    TextColor(Color::WHITE.with_alpha(0.8)),
                ));
            });

        header.spawn((
            Text::new(heading.to_owned()),
            text_font(font, 22.0),
            TextColor(Color::srgb(1.0, 0.97, 0.80)),
        ));
    });
}

fn spawn_panel(
    row: &mut ChildSpawnerCommands,
    asset_server: &AssetServer,
    font: &Handle<Font>,
    index: usize,
    image: &GalleryImage,
    weight: &ItemWeight,
) {
    let motion = PanelMotion::settled(weight);
    let picture: Handle<Image> = asset_server.load(image.url.clone());

    row.spawn((
        Panel {
            index,
            id: image.id.clone(),
            motion,
        },
        Button,
        Node {
            height: Val::Percent(100.0),
            flex_grow: motion.grow,
            flex_basis: Val::Percent(motion.basis),
            min_width: Val::Px(motion.min_width),
            overflow: Overflow::clip(),
            ..default()
        },
        BackgroundColor(Color::BLACK),
    ))
    .with_children(|p| {
        p.spawn((
            PanelImage { index },
            ImageNode::new(picture).with_color(weight.image_tint()),
            zoomed_image_node(motion.zoom),
        ));

        // Caption (Open Panel)
        p.spawn((
            PanelCaption { index },
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                bottom: Val::Px(0.0),
                padding: UiRect::all(Val::Px(32.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(Color::BLACK.with_alpha(0.55)),
            visibility(weight.shows_caption()),
        ))
        .with_children(|c| {
            c.spawn((
                Text::new(image.title.clone()),
                text_font(font, 44.0),
                TextColor(Color::WHITE),
            ));
            c.spawn((
                Text::new(image.description.clone()),
                text_font(font, 16.0),
                TextColor(Color::srgb(1.0, 0.98, 0.76)),
            ));
        });

        // Spine (Collapsed Panel)
        p.spawn((
            PanelSpine { index },
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::BLACK.with_alpha(0.4)),
            visibility(!weight.shows_caption()),
        ))
        .with_children(|s| {
            s.spawn((
                Text::new(vertical_title(&image.title)),
                text_font(font, 11.0),
                TextColor(Color::WHITE.with_alpha(0.5)),
            ));
        });

        // Decorative Number
        p.spawn((
            Text::new(image.badge()),
            text_font(font, 28.0),
            TextColor(Color::WHITE.with_alpha(0.2)),
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(16.0),
                top: Val::Px(16.0),
                ..default()
            },
        ));
    });
}

pub(super) fn back_button(
    mut q: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<BackButton>)>,
    mut actions: MessageWriter<ViewAction>,
) {
    for (interaction, mut bg) in q.iter_mut() {
        bg.0 = nav_button_color(*interaction);
        if *interaction == Interaction::Pressed {
            actions.write(ViewAction::Back);
        }
    }
}

/// Pointer-Enter is the Only Selection Input; No Debounce
pub(super) fn hover_panels(
    q: Query<(&Interaction, &Panel), Changed<Interaction>>,
    selection: Option<ResMut<ActiveSelection>>,
) {
    let Some(mut selection) = selection else {
        return;
    };
    for (interaction, panel) in q.iter() {
        if *interaction == Interaction::None {
            continue;
        }
        if selection.hover(&panel.id) {
            debug!("panel {} ({}) active", panel.index, panel.id);
        }
    }
}

pub(super) fn sync_panels(
    time: Res<Time>,
    catalog: Res<Catalog>,
    selection: Option<Res<ActiveSelection>>,
    mut q_panels: Query<(&mut Panel, &mut Node), Without<PanelImage>>,
    mut q_images: Query<(&PanelImage, &mut ImageNode, &mut Node), Without<Panel>>,
    mut q_captions: Query<(&PanelCaption, &mut Visibility), Without<PanelSpine>>,
    mut q_spines: Query<(&PanelSpine, &mut Visibility), Without<PanelCaption>>,
) {
    let Some(selection) = selection else {
        return;
    };
    let weights = layout(&catalog.images, selection.id());
    let dt = time.delta_secs();

    let mut zooms = vec![1.0; weights.len()];
    for (mut panel, mut node) in q_panels.iter_mut() {
        let Some(w) = weights.get(panel.index) else {
            continue;
        };
        if !panel.motion.is_settled(w) {
            panel.motion.step_toward(w, PANEL_EASE_RATE, dt);
        } else {
            panel.motion = PanelMotion::settled(w);
        }
        let m = panel.motion;
        node.flex_grow = m.grow;
        node.flex_basis = Val::Percent(m.basis);
        node.min_width = Val::Px(m.min_width);
        zooms[panel.index] = m.zoom;
    }

    for (img, mut image_node, mut node) in q_images.iter_mut() {
        let Some(w) = weights.get(img.index) else {
            continue;
        };
        image_node.color = w.image_tint();
        let zoom = zooms[img.index];
        *node = zoomed_image_node(zoom);
    }

    if !selection.is_changed() {
        return;
    }
    for (caption, mut vis) in q_captions.iter_mut() {
        if let Some(w) = weights.get(caption.index) {
            *vis = visibility(w.shows_caption());
        }
    }
    for (spine, mut vis) in q_spines.iter_mut() {
        if let Some(w) = weights.get(spine.index) {
            *vis = visibility(!w.shows_caption());
        }
    }
}

pub(super) fn animate_confetti(
    time: Res<Time>,
    clock: Option<Res<SceneClock>>,
    mut q: Query<(&ConfettiBit, &mut Node, &mut BackgroundColor, &mut Visibility)>,
) {
    let Some(clock) = clock else {
        return;
    };
    let t = clock.local(time.elapsed_secs());

    for (bit, mut node, mut bg, mut vis) in q.iter_mut() {
        let f = confetti_frame(&bit.0, t);
        node.top = Val::Percent(CONFETTI_TOP_START + (CONFETTI_TOP_END - CONFETTI_TOP_START) * f.fall);
        node.margin.left = Val::Px(f.drift_px);
        bg.0 = Color::from(bit.0.color).with_alpha(0.9 * f.opacity);
        *vis = visibility(f.opacity > 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::AssetPlugin;
    use stagelib::accordion::ItemWeight;

    fn image(id: &str) -> GalleryImage {
        GalleryImage {
            id: id.into(),
            url: format!("photo/{id}.jpg"),
            title: id.to_uppercase(),
            description: String::new(),
        }
    }

    fn catalog_abc() -> Catalog {
        Catalog {
            images: vec![image("a"), image("b"), image("c")],
            ..default()
        }
    }

    fn spawn_bare_panel(world: &mut World, index: usize, id: &str, interaction: Interaction) {
        let w = if index == 0 { ItemWeight::ACTIVE } else { ItemWeight::INACTIVE };
        world.spawn((
            Panel {
                index,
                id: id.into(),
                motion: PanelMotion::settled(&w),
            },
            interaction,
            Node::default(),
        ));
        world.spawn((PanelCaption { index }, visibility(w.shows_caption())));
        world.spawn((PanelSpine { index }, visibility(!w.shows_caption())));
    }

    fn visible_captions(app: &mut App) -> Vec<usize> {
        let mut q = app.world_mut().query::<(&PanelCaption, &Visibility)>();
        let mut shown: Vec<usize> = q
            .iter(app.world())
            .filter(|(_, vis)| **vis != Visibility::Hidden)
            .map(|(c, _)| c.index)
            .collect();
        shown.sort();
        shown
    }

    #[test]
    fn hovering_a_panel_moves_the_selection_and_caption() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(catalog_abc())
            .insert_resource(ActiveSelection(Some("a".into())))
            .add_systems(Update, (hover_panels, sync_panels).chain());

        spawn_bare_panel(app.world_mut(), 0, "a", Interaction::None);
        spawn_bare_panel(app.world_mut(), 1, "b", Interaction::None);
        spawn_bare_panel(app.world_mut(), 2, "c", Interaction::Hovered);
        assert_eq!(visible_captions(&mut app), vec![0]);

        app.update();

        assert_eq!(app.world().resource::<ActiveSelection>().id(), Some("c"));
        assert_eq!(visible_captions(&mut app), vec![2]);

        let mut spines = app.world_mut().query::<(&PanelSpine, &Visibility)>();
        for (spine, vis) in spines.iter(app.world()) {
            assert_eq!(*vis == Visibility::Hidden, spine.index == 2);
        }
    }

    #[test]
    fn leaving_a_panel_keeps_the_selection() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(catalog_abc())
            .insert_resource(ActiveSelection(Some("b".into())))
            .add_systems(Update, hover_panels);

        spawn_bare_panel(app.world_mut(), 0, "a", Interaction::None);
        app.update();

        assert_eq!(app.world().resource::<ActiveSelection>().id(), Some("b"));
    }

    fn spawn_app(catalog: Catalog) -> App {
        let selection = ActiveSelection::first_of(&catalog);
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Image>()
            .init_asset::<Font>()
            .insert_resource(catalog)
            .insert_resource(selection)
            .init_resource::<StageSettings>()
            .insert_resource(GalleryScene { confetti: Vec::new() })
            .add_systems(Update, spawn_gallery);
        app.update();
        app
    }

    fn count<C: Component>(app: &mut App) -> usize {
        let mut q = app.world_mut().query::<&C>();
        q.iter(app.world()).count()
    }

    #[test]
    fn empty_catalog_spawns_a_gallery_without_panels() {
        let mut app = spawn_app(Catalog {
            images: Vec::new(),
            ..default()
        });
        assert_eq!(count::<DespawnOnExit<ViewState>>(&mut app), 1);
        assert_eq!(count::<BackButton>(&mut app), 1);
        assert_eq!(count::<Panel>(&mut app), 0);
        assert_eq!(count::<ConfettiBit>(&mut app), 0);
    }

    #[test]
    fn one_panel_per_catalog_entry_first_open() {
        let mut app = spawn_app(catalog_abc());
        assert_eq!(count::<Panel>(&mut app), 3);
        assert_eq!(visible_captions(&mut app), vec![0]);
    }

    #[test]
    fn vertical_title_stacks_chars() {
        assert_eq!(vertical_title("深情黄子"), "深\n情\n黄\n子");
        assert_eq!(vertical_title(""), "");
    }

    #[test]
    fn zoom_stays_centred() {
        let n = zoomed_image_node(1.1);
        assert_eq!(n.width, Val::Percent(110.0));
        match n.left {
            Val::Percent(v) => assert!((v + 5.0).abs() < 1e-4),
            other => panic!("unexpected left {other:?}"),
        }
    }
}
