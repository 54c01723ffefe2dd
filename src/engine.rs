//! Game engine: playback control, frame cadence and state publishing
//!
//! One engine per session. The host owns the frame clock and calls
//! [`Engine::on_frame`] for each frame the engine requested; every other
//! mutation goes through the explicit control methods. Observers receive a
//! [`Snapshot`] after each observable change.

use crate::achievements;
use crate::error::EngineError;
use crate::highscores::HighScore;
use crate::persistence::{self, KeyValueStore};
use crate::platform::{FrameHandle, FrameScheduler, InputEvent};
use crate::renderer::{self, Surface};
use crate::settings::{ConfigUpdate, EngineConfig};
use crate::sim::{self, GameEvent, GamePhase, GameState, PaddleDirection};

pub use crate::sim::Snapshot;

/// Handle returned by [`Engine::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Snapshot)>;

pub struct Engine {
    config: EngineConfig,
    state: GameState,
    /// Released on destroy
    surface: Option<Box<dyn Surface>>,
    scheduler: Box<dyn FrameScheduler>,
    store: Box<dyn KeyValueStore>,
    pending_frame: Option<FrameHandle>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    destroyed: bool,
}

impl Engine {
    /// Build an engine, load persisted progress and draw the first frame
    pub fn new(
        config: EngineConfig,
        surface: Box<dyn Surface>,
        scheduler: Box<dyn FrameScheduler>,
        store: Box<dyn KeyValueStore>,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let (width, height) = surface.size();
        if width <= 0.0 || height <= 0.0 {
            return Err(EngineError::SurfaceUnavailable(format!(
                "surface has no drawable area ({}x{})",
                width, height
            )));
        }

        let unlocked = persistence::load_achievements(store.as_ref());
        let high_score = HighScore::load(store.as_ref());
        let state = GameState::new(config.canvas_width, config.canvas_height)
            .with_progress(unlocked, high_score);

        let mut engine = Self {
            config,
            state,
            surface: Some(surface),
            scheduler,
            store,
            pending_frame: None,
            listeners: Vec::new(),
            next_subscription: 1,
            destroyed: false,
        };
        engine.render();

        log::info!(
            "Engine ready ({}x{}, {} theme)",
            engine.config.canvas_width,
            engine.config.canvas_height,
            engine.config.theme.as_str()
        );
        Ok(engine)
    }

    /// Register an observer for state snapshots
    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() < before
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Read-only view of the simulation
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Start a run (resetting after a game over) and begin the frame cadence
    pub fn start(&mut self) {
        if self.destroyed {
            return;
        }
        if self.state.begin() {
            log::info!("Run started at level {}", self.state.level);
            self.schedule_frame();
            self.render();
            self.publish();
        }
    }

    /// Toggle pause. Pausing cancels the pending frame; unpausing resumes.
    pub fn pause(&mut self) {
        if self.destroyed {
            return;
        }
        if self.state.toggle_pause() {
            self.cancel_frame();
            log::info!("Paused");
        } else {
            self.schedule_frame();
            log::info!("Resumed");
        }
        self.publish();
    }

    pub fn set_paddle_direction(&mut self, direction: PaddleDirection) {
        self.state.paddle.steer(direction);
    }

    /// Apply a player command
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Launch => self.start(),
            InputEvent::TogglePause => self.pause(),
            other => {
                if let Some(direction) = other.direction() {
                    self.set_paddle_direction(direction);
                }
            }
        }
    }

    /// Back to level 1 with full lives, keeping achievements and high score
    pub fn reset_game(&mut self) {
        if self.destroyed {
            return;
        }
        self.cancel_frame();
        self.state.reset();
        self.render();
        self.publish();
    }

    /// Merge a config update and redraw immediately
    pub fn update_config(&mut self, update: ConfigUpdate) {
        self.config.apply(&update);
        log::debug!("Theme set to {}", self.config.theme.as_str());
        self.render();
    }

    /// Run one tick (simulate + render). Called by the host when the
    /// requested frame comes due.
    pub fn on_frame(&mut self) {
        if self.destroyed {
            return;
        }
        // Only a requested frame advances the game
        let Some(handle) = self.pending_frame.take() else {
            return;
        };
        // No-op once the frame has fired; drops it if the host called early
        self.scheduler.cancel_frame(handle);

        let events = sim::tick(&mut self.state);
        self.dispatch(events);
        self.render();

        self.schedule_frame();
    }

    /// Stop all scheduled activity and release the surface. Safe to call
    /// more than once.
    pub fn destroy(&mut self) {
        self.cancel_frame();
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.surface = None;
        self.listeners.clear();
        log::info!("Engine destroyed");
    }

    fn schedule_frame(&mut self) {
        let runnable = self.state.playing && !self.state.paused;
        if runnable && self.pending_frame.is_none() {
            self.pending_frame = Some(self.scheduler.request_frame());
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn render(&mut self) {
        if let Some(surface) = self.surface.as_deref_mut() {
            renderer::render(&self.state, self.config.theme, surface);
        }
    }

    fn publish(&mut self) {
        let snapshot = self.state.snapshot();
        self.notify(&snapshot);
    }

    fn notify(&mut self, snapshot: &Snapshot) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(snapshot);
        }
    }

    fn dispatch(&mut self, events: Vec<GameEvent>) {
        for event in events {
            match event {
                GameEvent::AchievementsUnlocked(ids) => {
                    for id in &ids {
                        if let Some(achievement) = achievements::find(id) {
                            log::info!("Achievement unlocked: {}", achievement.title);
                        }
                    }
                    let saved = persistence::save_achievements(
                        self.store.as_mut(),
                        &self.state.achievements,
                    );
                    if let Err(e) = saved {
                        log::warn!("Failed to save achievements: {}", e);
                    }
                }
                GameEvent::NewHighScore(score) => {
                    log::debug!("New high score {}", score);
                    if let Err(e) = self.state.high_score.save(self.store.as_mut()) {
                        log::warn!("Failed to save high score: {}", e);
                    }
                }
                GameEvent::LifeLost { lives } => {
                    log::info!("Life lost, {} remaining", lives);
                }
                GameEvent::StateChanged(snapshot) => self.notify(&snapshot),
                GameEvent::BrickBroken { .. }
                | GameEvent::GameOver { .. }
                | GameEvent::LevelCleared { .. } => {}
            }
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use glam::Vec2;

    use super::*;
    use crate::consts::*;
    use crate::persistence::{ACHIEVEMENTS_KEY, HIGH_SCORE_KEY, MemoryStore};
    use crate::platform::ManualScheduler;
    use crate::renderer::{Color, Glow, RecordingSurface};
    use crate::settings::Theme;

    /// Draw counts shared between a test and the surface the engine owns
    #[derive(Debug, Default)]
    struct DrawCounts {
        clears: Cell<u32>,
        fills: Cell<u32>,
    }

    struct CountingSurface(Rc<DrawCounts>);

    impl Surface for CountingSurface {
        fn size(&self) -> (f32, f32) {
            (CANVAS_WIDTH, CANVAS_HEIGHT)
        }

        fn clear(&mut self) {
            self.0.clears.set(self.0.clears.get() + 1);
        }

        fn set_glow(&mut self, _glow: Option<Glow>) {}

        fn fill_rect(&mut self, _pos: Vec2, _width: f32, _height: f32, _color: Color) {
            self.0.fills.set(self.0.fills.get() + 1);
        }

        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {
            self.0.fills.set(self.0.fills.get() + 1);
        }
    }

    fn counted_engine() -> (Engine, ManualScheduler, Rc<DrawCounts>) {
        let counts = Rc::new(DrawCounts::default());
        let scheduler = ManualScheduler::new();
        let engine = Engine::new(
            EngineConfig::default(),
            Box::new(CountingSurface(counts.clone())),
            Box::new(scheduler.clone()),
            Box::new(MemoryStore::new()),
        )
        .unwrap();
        (engine, scheduler, counts)
    }

    fn engine_with(store: MemoryStore) -> (Engine, ManualScheduler) {
        let scheduler = ManualScheduler::new();
        let engine = Engine::new(
            EngineConfig::default(),
            Box::new(RecordingSurface::new(CANVAS_WIDTH, CANVAS_HEIGHT)),
            Box::new(scheduler.clone()),
            Box::new(store),
        )
        .unwrap();
        (engine, scheduler)
    }

    #[test]
    fn test_surface_without_area_is_rejected() {
        let result = Engine::new(
            EngineConfig::default(),
            Box::new(RecordingSurface::new(0.0, 0.0)),
            Box::new(ManualScheduler::new()),
            Box::new(MemoryStore::new()),
        );
        assert!(matches!(result, Err(EngineError::SurfaceUnavailable(_))));
    }

    #[test]
    fn test_loads_persisted_progress() {
        let store = MemoryStore::with_entries([
            (HIGH_SCORE_KEY, "4200"),
            (ACHIEVEMENTS_KEY, r#"["novice"]"#),
        ]);
        let (engine, _) = engine_with(store);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.high_score, 4200);
        assert_eq!(snapshot.achievements, vec!["novice".to_string()]);
    }

    #[test]
    fn test_malformed_progress_is_ignored() {
        let store = MemoryStore::with_entries([
            (HIGH_SCORE_KEY, "NaN"),
            (ACHIEVEMENTS_KEY, "oops"),
        ]);
        let (engine, _) = engine_with(store);
        assert_eq!(engine.snapshot().high_score, 0);
        assert!(engine.snapshot().achievements.is_empty());
    }

    #[test]
    fn test_start_schedules_and_publishes() {
        let (mut engine, scheduler) = engine_with(MemoryStore::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        engine.subscribe(move |s| sink.borrow_mut().push(s.clone()));

        engine.start();
        assert!(engine.has_pending_frame());
        assert_eq!(scheduler.pending_count(), 1);
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert!(engine.state().ball.active);
        assert!(seen.borrow().last().is_some_and(|s| s.is_playing));

        // Starting again does nothing
        engine.start();
        assert_eq!(scheduler.requested(), 1);
    }

    #[test]
    fn test_frames_keep_cadence() {
        let (mut engine, scheduler) = engine_with(MemoryStore::new());
        engine.start();
        for _ in 0..10 {
            assert!(scheduler.next_due().is_some());
            engine.on_frame();
        }
        assert_eq!(scheduler.pending_count(), 1);
        assert_eq!(engine.state().ball.pos, Vec2::new(440.0, 510.0));
    }

    #[test]
    fn test_pause_freezes_and_resumes() {
        let (mut engine, scheduler) = engine_with(MemoryStore::new());
        engine.start();
        engine.set_paddle_direction(PaddleDirection::Right);
        scheduler.next_due();
        engine.on_frame();

        engine.pause();
        assert_eq!(engine.phase(), GamePhase::Paused);
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(scheduler.cancelled(), 1);
        assert!(!engine.has_pending_frame());

        let ball = engine.state().ball.pos;
        let paddle = engine.state().paddle.pos;
        // A stray frame while paused changes nothing and schedules nothing
        engine.on_frame();
        assert_eq!(engine.state().ball.pos, ball);
        assert_eq!(engine.state().paddle.pos, paddle);
        assert_eq!(scheduler.pending_count(), 0);

        engine.pause();
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert_eq!(scheduler.pending_count(), 1);
    }

    #[test]
    fn test_pause_while_idle_does_not_schedule() {
        let (mut engine, scheduler) = engine_with(MemoryStore::new());
        engine.pause();
        engine.pause();
        assert_eq!(scheduler.requested(), 0);
        assert_eq!(engine.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_input_events() {
        let (mut engine, _) = engine_with(MemoryStore::new());
        engine.handle_input(InputEvent::MoveLeft);
        assert_eq!(engine.state().paddle.dx, -PADDLE_SPEED);
        engine.handle_input(InputEvent::Stop);
        assert_eq!(engine.state().paddle.dx, 0.0);
        engine.handle_input(InputEvent::Launch);
        assert_eq!(engine.phase(), GamePhase::Playing);
        engine.handle_input(InputEvent::TogglePause);
        assert_eq!(engine.phase(), GamePhase::Paused);
    }

    #[test]
    fn test_update_config_redraws() {
        let (mut engine, scheduler, counts) = counted_engine();
        // Initial frame drawn on construction
        assert_eq!(counts.clears.get(), 1);
        let fills = counts.fills.get();
        assert_eq!(fills, 2 + 32);

        engine.update_config(ConfigUpdate::theme(Theme::Light));
        assert_eq!(engine.config().theme, Theme::Light);
        assert_eq!(counts.clears.get(), 2);
        assert_eq!(counts.fills.get(), 2 * fills);
        // Redraw happens without a frame request
        assert_eq!(scheduler.requested(), 0);

        engine.update_config(ConfigUpdate::default());
        assert_eq!(engine.config().theme, Theme::Light);
        assert_eq!(counts.clears.get(), 3);
    }

    #[test]
    fn test_destroy_releases_surface() {
        let (mut engine, scheduler, counts) = counted_engine();
        engine.start();
        assert_eq!(Rc::strong_count(&counts), 2);

        engine.destroy();
        assert_eq!(Rc::strong_count(&counts), 1);
        let clears = counts.clears.get();
        let fills = counts.fills.get();

        engine.update_config(ConfigUpdate::theme(Theme::Light));
        engine.reset_game();
        engine.start();
        engine.on_frame();
        assert_eq!(counts.clears.get(), clears);
        assert_eq!(counts.fills.get(), fills);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_stray_frame_keeps_single_request() {
        let (mut engine, scheduler) = engine_with(MemoryStore::new());
        engine.start();

        // Host calls in without taking the due frame
        engine.on_frame();
        assert_eq!(scheduler.pending_count(), 1);
        assert!(engine.has_pending_frame());

        engine.pause();
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_frames_only_advance_when_requested() {
        let (mut engine, scheduler) = engine_with(MemoryStore::new());
        engine.start();
        scheduler.next_due();
        engine.on_frame();
        let ball = engine.state().ball.pos;

        // The engine queued its next frame
        assert_eq!(scheduler.pending_count(), 1);
        scheduler.next_due();
        engine.on_frame();
        assert_ne!(engine.state().ball.pos, ball);
        let ball = engine.state().ball.pos;

        engine.pause();
        engine.on_frame();
        engine.on_frame();
        assert_eq!(engine.state().ball.pos, ball);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_game_over_then_start_resets_run() {
        let store = MemoryStore::new();
        let (mut engine, scheduler) = engine_with(store);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        engine.subscribe(move |s: &Snapshot| sink.borrow_mut().push(s.clone()));

        engine.start();
        engine.state.achievements.push("first_blood".to_string());
        engine.state.score = 500;
        engine.state.lives = 1;
        engine.state.paddle.pos.x = 0.0;
        engine.state.ball.pos = Vec2::new(400.0, 592.0);
        engine.state.ball.vel = Vec2::new(0.0, 4.0);

        scheduler.next_due();
        engine.on_frame();

        assert_eq!(engine.phase(), GamePhase::GameOver);
        assert!(!engine.has_pending_frame());
        assert_eq!(scheduler.pending_count(), 0);
        let last = seen.borrow().last().cloned().unwrap();
        assert!(last.is_game_over);
        assert!(!last.is_playing);
        assert_eq!(last.lives, 0);
        assert_eq!(last.score, 500);

        engine.start();
        let restarted = engine.snapshot();
        assert_eq!(restarted.score, 0);
        assert_eq!(restarted.lives, 3);
        assert_eq!(restarted.level, 1);
        assert!(restarted.is_playing);
        assert!(!restarted.is_game_over);
        assert_eq!(restarted.achievements, vec!["first_blood".to_string()]);
        assert_eq!(engine.state().bricks.len(), 32);
        assert_eq!(scheduler.pending_count(), 1);
    }

    #[test]
    fn test_destroy_cancels_and_is_idempotent() {
        let (mut engine, scheduler) = engine_with(MemoryStore::new());
        engine.start();
        engine.destroy();
        assert!(engine.is_destroyed());
        assert_eq!(scheduler.pending_count(), 0);
        engine.destroy();
        assert_eq!(scheduler.cancelled(), 1);

        engine.start();
        engine.on_frame();
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_drop_cancels_pending_frame() {
        let (mut engine, scheduler) = engine_with(MemoryStore::new());
        engine.start();
        drop(engine);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let (mut engine, _) = engine_with(MemoryStore::new());
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        let id = engine.subscribe(move |_| *sink.borrow_mut() += 1);
        engine.start();
        assert!(engine.unsubscribe(id));
        assert!(!engine.unsubscribe(id));
        engine.pause();
        assert_eq!(*count.borrow(), 1);
    }
}
