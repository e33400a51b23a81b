//! Host adapter
//!
//! Translates host callbacks (frames, touches, contacts) into simulation
//! calls and hands finished scenes to a presentation surface.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{
    ContactBody, ContactKind, GameOverScene, PlayScene, Scene, SceneEvent, SceneLayout,
    SceneTransition, TickInput, classify_contact, resolve, tick,
};

/// Visual effect used when swapping scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    FlipHorizontal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub kind: TransitionKind,
    /// Seconds
    pub duration: f32,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            kind: TransitionKind::FlipHorizontal,
            duration: TRANSITION_DURATION,
        }
    }
}

/// A surface that can show scenes
pub trait View {
    fn present(&mut self, scene: &Scene, transition: Transition);
}

/// View that only logs what it would show
#[derive(Debug, Default)]
pub struct LogView;

impl View for LogView {
    fn present(&mut self, scene: &Scene, transition: Transition) {
        log::info!(
            "Presenting {} ({:?}, {:.1}s)",
            scene.label(),
            transition.kind,
            transition.duration
        );
    }
}

/// Game instance holding the presented scene and its surroundings
pub struct Game {
    scene: Scene,
    layout: SceneLayout,
    rng: Pcg32,
    seed: u64,
    view: Option<Box<dyn View>>,
    accumulator: f32,
    input: TickInput,
    /// Events drained from play scenes, oldest first, at most
    /// `MAX_PENDING_EVENTS` of them
    events: Vec<SceneEvent>,
}

impl Game {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let layout = settings.layout();
        Self {
            scene: Scene::Playing(PlayScene::new(layout)),
            layout,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            view: None,
            accumulator: 0.0,
            input: TickInput {
                touches: Vec::new(),
                autopilot: settings.autopilot,
            },
            events: Vec::new(),
        }
    }

    /// Attach a presentation surface and show the current scene on it
    pub fn with_view(mut self, view: Box<dyn View>) -> Self {
        self.attach_view(view);
        self
    }

    pub fn attach_view(&mut self, mut view: Box<dyn View>) {
        view.present(&self.scene, Transition::default());
        self.view = Some(view);
    }

    pub fn detach_view(&mut self) -> Option<Box<dyn View>> {
        self.view.take()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    /// Queue a shot toward `point`; it is fired on the next tick.
    /// Several touches before one tick each fire a shot.
    pub fn on_touch_ended(&mut self, point: Vec2) {
        self.input.touches.push(point);
    }

    /// Contact reported by an external physics world.
    ///
    /// Classifies the pair, applies the rule to the play scene and presents
    /// any resulting transition.
    pub fn on_contact_begin(&mut self, a: ContactBody, b: ContactBody) -> ContactKind {
        let kind = classify_contact(a, b);
        let Scene::Playing(play) = &mut self.scene else {
            return kind;
        };
        let transition = resolve(play, kind);
        keep_events(&mut self.events, play.take_events());
        if let Some(transition) = transition {
            self.apply_transition(transition);
        }
        kind
    }

    /// Run one fixed timestep
    pub fn step(&mut self, dt: f32) {
        let transition = tick(&mut self.scene, &self.input, &mut self.rng, dt);
        // Clear one-shot inputs after processing
        self.input.touches.clear();

        if let Scene::Playing(play) = &mut self.scene {
            keep_events(&mut self.events, play.take_events());
        }
        if let Some(transition) = transition {
            self.apply_transition(transition);
        }
    }

    /// Advance by wall-clock `dt`, running as many fixed steps as fit
    pub fn frame(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    /// Drain scene events recorded since the last call.
    ///
    /// Hosts that never call this lose the oldest events once
    /// `MAX_PENDING_EVENTS` are pending.
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    /// Present the scene a transition leads to. Without a view the
    /// transition is dropped and the current scene keeps running.
    fn apply_transition(&mut self, transition: SceneTransition) {
        let Some(view) = self.view.as_mut() else {
            log::debug!("No view attached, dropping {:?}", transition);
            return;
        };

        let next = match transition {
            SceneTransition::GameOver { won } => Scene::GameOver(GameOverScene::new(won)),
            SceneTransition::Restart => Scene::Playing(PlayScene::new(self.layout)),
        };

        if let Scene::Playing(play) = &self.scene {
            log::info!(
                "Play-through over: {} destroyed, {} hits taken",
                play.state.monsters_destroyed,
                play.state.times_player_hit
            );
        }
        view.present(&next, Transition::default());
        self.scene = next;
    }
}

/// Append `new` and drop the oldest events past the cap
fn keep_events(events: &mut Vec<SceneEvent>, new: Vec<SceneEvent>) {
    events.extend(new);
    if events.len() > MAX_PENDING_EVENTS {
        let excess = events.len() - MAX_PENDING_EVENTS;
        events.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{CategoryMask, EntityKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records scene labels instead of drawing
    #[derive(Default, Clone)]
    struct RecordingView(Rc<RefCell<Vec<String>>>);

    impl View for RecordingView {
        fn present(&mut self, scene: &Scene, _transition: Transition) {
            self.0.borrow_mut().push(scene.label());
        }
    }

    fn manual_game() -> Game {
        let settings = Settings {
            autopilot: false,
            ..Default::default()
        };
        Game::new(&settings, 1234)
    }

    fn spawn(game: &mut Game) -> (ContactBody, ContactBody) {
        let Scene::Playing(play) = &mut game.scene else {
            panic!("not playing");
        };
        let monster = play.spawn_monster(&mut game.rng);
        (
            ContactBody {
                entity: play.player_id(),
                category: CategoryMask::PLAYER,
            },
            ContactBody {
                entity: monster,
                category: CategoryMask::MONSTER,
            },
        )
    }

    #[test]
    fn test_loss_presents_game_over_then_restarts() {
        let presented = RecordingView::default();
        let mut game = manual_game().with_view(Box::new(presented.clone()));

        for _ in 0..4 {
            let (player, monster) = spawn(&mut game);
            let kind = game.on_contact_begin(monster, player);
            assert!(matches!(kind, ContactKind::PlayerHitByMonster { .. }));
        }
        assert!(!game.scene().is_playing());

        let steps = (RESTART_DELAY / SIM_DT).ceil() as usize + 1;
        for _ in 0..steps {
            game.step(SIM_DT);
        }

        let play = game.scene().as_playing().expect("restarted");
        assert_eq!(play.state.monsters_destroyed, 0);
        assert_eq!(play.state.times_player_hit, 0);
        assert_eq!(
            *presented.0.borrow(),
            vec!["Playing", "GameOver (You lose)", "Playing"]
        );
    }

    #[test]
    fn test_win_presents_game_over() {
        let presented = RecordingView::default();
        let mut game = manual_game().with_view(Box::new(presented.clone()));

        for kill in 1..=WIN_THRESHOLD + 1 {
            let (_, monster) = spawn(&mut game);
            let Scene::Playing(play) = &mut game.scene else {
                panic!("ended early at kill {kill}");
            };
            let target = play.player_pos() + Vec2::new(200.0, 0.0);
            let projectile = ContactBody {
                entity: play.fire_projectile(target).expect("forward shot"),
                category: CategoryMask::PROJECTILE,
            };
            let kind = game.on_contact_begin(projectile, monster);
            assert!(matches!(kind, ContactKind::MonsterHitByProjectile { .. }));
        }

        assert!(!game.scene().is_playing());
        assert_eq!(*presented.0.borrow(), vec!["Playing", "GameOver (You won!)"]);
    }

    #[test]
    fn test_no_view_drops_transition() {
        let mut game = manual_game();
        for _ in 0..5 {
            let (player, monster) = spawn(&mut game);
            game.on_contact_begin(player, monster);
        }
        let play = game.scene().as_playing().expect("transition was dropped");
        assert_eq!(play.state.times_player_hit, 5);
    }

    #[test]
    fn test_touch_is_one_shot() {
        let mut game = manual_game();
        let player = game.scene().as_playing().unwrap().player_pos();
        game.on_touch_ended(player + Vec2::new(200.0, 0.0));
        game.step(SIM_DT);
        game.step(SIM_DT);

        let fired = game
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, SceneEvent::ProjectileFired { .. }))
            .count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_each_touch_fires_a_shot() {
        let mut game = manual_game();
        let player = game.scene().as_playing().unwrap().player_pos();
        game.on_touch_ended(player + Vec2::new(200.0, 40.0));
        game.on_touch_ended(player + Vec2::new(200.0, -40.0));
        game.step(SIM_DT);

        let fired = game
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, SceneEvent::ProjectileFired { .. }))
            .count();
        assert_eq!(fired, 2);
    }

    #[test]
    fn test_undrained_events_are_capped() {
        let mut game = manual_game();
        let player = game.scene().as_playing().unwrap().player_pos();
        for _ in 0..1100 {
            game.on_touch_ended(player + Vec2::new(200.0, 0.0));
            game.step(SIM_DT);
        }

        let events = game.take_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        // The newest events are kept, including the last shot
        assert!(
            events
                .iter()
                .rev()
                .take(16)
                .any(|e| matches!(e, SceneEvent::ProjectileFired { .. }))
        );
    }

    #[test]
    fn test_frame_runs_fixed_substeps() {
        let mut game = manual_game();
        game.frame(SIM_DT * 3.5);
        let play = game.scene().as_playing().unwrap();
        assert!((play.time - SIM_DT * 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_no_spawns_while_game_over() {
        let mut game = manual_game().with_view(Box::new(LogView));
        for _ in 0..4 {
            let (player, monster) = spawn(&mut game);
            game.on_contact_begin(player, monster);
        }
        game.take_events();

        // Just short of the restart delay
        for _ in 0..(RESTART_DELAY / SIM_DT) as usize - 2 {
            game.step(SIM_DT);
        }
        assert!(!game.scene().is_playing());
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn test_autopilot_session_reaches_an_ending() {
        let settings = Settings {
            autopilot: true,
            ..Default::default()
        };
        let presented = RecordingView::default();
        let mut game = Game::new(&settings, 2024).with_view(Box::new(presented.clone()));

        // Two minutes of play is plenty for 31 kills or 4 hits
        for _ in 0..(120.0 / SIM_DT) as usize {
            game.step(SIM_DT);
            if !game.scene().is_playing() {
                break;
            }
        }
        assert!(!game.scene().is_playing());
        assert_eq!(presented.0.borrow().len(), 2);
        assert!(game.take_events().iter().any(|e| matches!(
            e,
            SceneEvent::Removed {
                kind: EntityKind::Monster,
                ..
            }
        )));
    }
}
