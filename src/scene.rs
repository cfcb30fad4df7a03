/*
Stagelight - by David Petnick
*/
use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::accordion::ActiveSelection;
use crate::catalog::Catalog;
use crate::options::StageSettings;
use crate::particles::{Bubble, ConfettiPiece, Star, generate_bubbles, generate_confetti, generate_stars};
use crate::view::ViewState;

/// Injected Random Source for Every Particle Draw
#[derive(Resource)]
pub struct ParticleRng(pub StdRng);

impl ParticleRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_rng(&mut rand::rng())),
        }
    }
}

/// Seconds Since the Current Screen Was Entered
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SceneClock {
    started_at: f32,
}

impl SceneClock {
    pub fn starting_at(now: f32) -> Self {
        Self { started_at: now }
    }

    pub fn local(&self, now: f32) -> f32 {
        (now - self.started_at).max(0.0)
    }
}

/// Per-Visit Landing State
#[derive(Resource, Debug, Clone)]
pub struct LandingScene {
    pub stars: Vec<Star>,
    pub bubbles: Vec<Bubble>,
}

/// Per-Visit Gallery State (ActiveSelection Lives Beside It)
#[derive(Resource, Debug, Clone)]
pub struct GalleryScene {
    pub confetti: Vec<ConfettiPiece>,
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Catalog>();
        app.init_resource::<StageSettings>();

        let seed = app.world().resource::<StageSettings>().seed;
        app.insert_resource(ParticleRng::new(seed));

        app.add_systems(OnEnter(ViewState::Landing), begin_landing)
            .add_systems(OnExit(ViewState::Landing), end_landing)
            .add_systems(OnEnter(ViewState::Gallery), begin_gallery)
            .add_systems(OnExit(ViewState::Gallery), end_gallery);
    }
}

pub fn begin_landing(
    mut commands: Commands,
    settings: Res<StageSettings>,
    mut rng: ResMut<ParticleRng>,
    time: Res<Time>,
) {
    let counts = settings.particles;
    let stars = generate_stars(&mut rng.0, counts.stars);
    let bubbles = generate_bubbles(&mut rng.0, counts.bubbles);
    debug!("landing: {} stars, {} bubbles", stars.len(), bubbles.len());

    commands.insert_resource(LandingScene { stars, bubbles });
    commands.insert_resource(SceneClock::starting_at(time.elapsed_secs()));
}

fn end_landing(mut commands: Commands) {
    commands.remove_resource::<LandingScene>();
    commands.remove_resource::<SceneClock>();
}

pub fn begin_gallery(
    mut commands: Commands,
    catalog: Res<Catalog>,
    settings: Res<StageSettings>,
    mut rng: ResMut<ParticleRng>,
    time: Res<Time>,
) {
    let selection = ActiveSelection::first_of(&catalog);
    if catalog.is_empty() {
        warn!("catalog is empty; gallery will show no panels");
    }

    let confetti = generate_confetti(&mut rng.0, settings.particles.confetti);
    debug!("gallery: {} panels, {} confetti", catalog.images.len(), confetti.len());

    commands.insert_resource(selection);
    commands.insert_resource(GalleryScene { confetti });
    commands.insert_resource(SceneClock::starting_at(time.elapsed_secs()));
}

fn end_gallery(mut commands: Commands) {
    commands.remove_resource::<GalleryScene>();
    commands.remove_resource::<ActiveSelection>();
    commands.remove_resource::<SceneClock>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{ViewAction, ViewPlugin};
    use bevy::state::app::StatesPlugin;

    fn app_with(catalog: Catalog) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(catalog)
            .insert_resource(StageSettings {
                seed: Some(1234),
                ..StageSettings::default()
            })
            .add_plugins((ViewPlugin, ScenePlugin));
        app.update();
        app
    }

    fn send(app: &mut App, action: ViewAction) {
        app.world_mut()
            .resource_mut::<Messages<ViewAction>>()
            .write(action);
        app.update();
        app.update();
    }

    #[test]
    fn landing_generates_on_first_frame() {
        let app = app_with(Catalog::default());
        let scene = app.world().resource::<LandingScene>();
        assert_eq!(scene.stars.len(), 30);
        assert_eq!(scene.bubbles.len(), 20);
        assert!(app.world().get_resource::<GalleryScene>().is_none());
    }

    #[test]
    fn enter_builds_gallery_and_drops_landing() {
        let mut app = app_with(Catalog::default());
        send(&mut app, ViewAction::Enter);

        let world = app.world();
        assert_eq!(*world.resource::<State<ViewState>>().get(), ViewState::Gallery);
        assert_eq!(world.resource::<ActiveSelection>().id(), Some("1"));
        assert_eq!(world.resource::<GalleryScene>().confetti.len(), 150);
        assert!(world.get_resource::<LandingScene>().is_none());
    }

    #[test]
    fn back_then_enter_starts_fresh() {
        let mut app = app_with(Catalog::default());
        send(&mut app, ViewAction::Enter);
        let first_visit = app.world().resource::<GalleryScene>().confetti.clone();

        app.world_mut().resource_mut::<ActiveSelection>().hover("7");

        send(&mut app, ViewAction::Back);
        assert_eq!(*app.world().resource::<State<ViewState>>().get(), ViewState::Landing);
        assert!(app.world().get_resource::<ActiveSelection>().is_none());
        assert!(app.world().get_resource::<GalleryScene>().is_none());
        assert!(app.world().get_resource::<LandingScene>().is_some());

        send(&mut app, ViewAction::Enter);
        let world = app.world();
        assert_eq!(world.resource::<ActiveSelection>().id(), Some("1"));
        assert_ne!(world.resource::<GalleryScene>().confetti, first_visit);
    }

    #[test]
    fn empty_catalog_gallery_has_no_selection() {
        let empty = Catalog {
            images: Vec::new(),
            ..Catalog::default()
        };
        let mut app = app_with(empty);
        send(&mut app, ViewAction::Enter);

        let world = app.world();
        assert_eq!(*world.resource::<State<ViewState>>().get(), ViewState::Gallery);
        assert_eq!(world.resource::<ActiveSelection>().id(), None);
        assert!(!world.resource::<GalleryScene>().confetti.is_empty());
    }

    #[test]
    fn scene_clock_never_negative() {
        let clock = SceneClock::starting_at(10.0);
        assert_eq!(clock.local(12.5), 2.5);
        assert_eq!(clock.local(9.0), 0.0);
    }
}
