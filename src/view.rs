/*
Stagelight - by David Petnick
*/
use bevy::prelude::*;

/// Which Screen is Up; Cyclic, No Terminal State
#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewState {
    #[default]
    Landing,
    Gallery,
}

/// User Navigation; the Only Way ViewState Changes
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    Enter,
    Back,
}

impl ViewState {
    /// Full Transition Table; None = Action Ignored in This State
    pub fn next(self, action: ViewAction) -> Option<ViewState> {
        match (self, action) {
            (ViewState::Landing, ViewAction::Enter) => Some(ViewState::Gallery),
            (ViewState::Landing, ViewAction::Back) => None,
            (ViewState::Gallery, ViewAction::Back) => Some(ViewState::Landing),
            (ViewState::Gallery, ViewAction::Enter) => None,
        }
    }
}

pub struct ViewPlugin;

impl Plugin for ViewPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<ViewState>()
            .add_message::<ViewAction>()
            .add_systems(Update, (keyboard_view_actions, apply_view_actions).chain())
            .add_systems(OnEnter(ViewState::Landing), log_enter)
            .add_systems(OnEnter(ViewState::Gallery), log_enter);
    }
}

fn keyboard_view_actions(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<ViewState>>,
    mut actions: MessageWriter<ViewAction>,
) {
    match state.get() {
        ViewState::Landing => {
            if keys.any_just_pressed([KeyCode::Enter, KeyCode::NumpadEnter, KeyCode::Space]) {
                actions.write(ViewAction::Enter);
            }
        }
        ViewState::Gallery => {
            if keys.any_just_pressed([KeyCode::Escape, KeyCode::Backspace]) {
                actions.write(ViewAction::Back);
            }
        }
    }
}

/// Fold Every Action Written This Frame Through the Table
fn apply_view_actions(
    mut actions: MessageReader<ViewAction>,
    state: Res<State<ViewState>>,
    mut next: ResMut<NextState<ViewState>>,
) {
    let current = *state.get();
    let mut target = current;
    for action in actions.read() {
        match target.next(*action) {
            Some(s) => target = s,
            None => debug!("ignoring {:?} while in {:?}", action, target),
        }
    }

    if target != current {
        next.set(target);
    }
}

fn log_enter(state: Res<State<ViewState>>) {
    info!("entered {:?}", state.get());
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn transition_table() {
        assert_eq!(ViewState::default(), ViewState::Landing);
        assert_eq!(ViewState::Landing.next(ViewAction::Enter), Some(ViewState::Gallery));
        assert_eq!(ViewState::Gallery.next(ViewAction::Back), Some(ViewState::Landing));
        assert_eq!(ViewState::Landing.next(ViewAction::Back), None);
        assert_eq!(ViewState::Gallery.next(ViewAction::Enter), None);
    }

    #[test]
    fn cycle_never_terminates() {
        let mut s = ViewState::Landing;
        for _ in 0..10 {
            s = s.next(ViewAction::Enter).unwrap_or(s);
            assert_eq!(s, ViewState::Gallery);
            s = s.next(ViewAction::Back).unwrap_or(s);
            assert_eq!(s, ViewState::Landing);
        }
    }

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_resource::<ButtonInput<KeyCode>>()
            .add_plugins(ViewPlugin);
        app.update();
        app
    }

    fn send(app: &mut App, action: ViewAction) {
        app.world_mut()
            .resource_mut::<Messages<ViewAction>>()
            .write(action);
        // Update queues NextState; the transition lands on the following frame
        app.update();
        app.update();
    }

    fn current(app: &App) -> ViewState {
        *app.world().resource::<State<ViewState>>().get()
    }

    #[test]
    fn messages_drive_state() {
        let mut app = app();
        assert_eq!(current(&app), ViewState::Landing);

        send(&mut app, ViewAction::Back);
        assert_eq!(current(&app), ViewState::Landing);

        send(&mut app, ViewAction::Enter);
        assert_eq!(current(&app), ViewState::Gallery);

        send(&mut app, ViewAction::Back);
        assert_eq!(current(&app), ViewState::Landing);
    }

    #[test]
    fn exit_despawns_only_that_screens_roots() {
        let mut app = app();
        let landing = app.world_mut().spawn(DespawnOnExit(ViewState::Landing)).id();
        let child = app.world_mut().spawn(ChildOf(landing)).id();
        let gallery = app.world_mut().spawn(DespawnOnExit(ViewState::Gallery)).id();

        send(&mut app, ViewAction::Enter);

        assert!(app.world().get_entity(landing).is_err());
        assert!(app.world().get_entity(child).is_err());
        assert!(app.world().get_entity(gallery).is_ok());

        send(&mut app, ViewAction::Back);
        assert!(app.world().get_entity(gallery).is_err());
    }
}
