//! Game state and core simulation types
//!
//! Everything a run needs lives here: entities, session counters, cumulative
//! stats and the unlocked achievement list.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::highscores::HighScore;
use crate::{ball_spawn, launch_velocity};

/// Current playback phase, derived from the session flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    Idle,
    /// Active gameplay
    Playing,
    /// Frozen until unpaused
    Paused,
    /// Run ended, next start resets
    GameOver,
}

/// Paddle steering intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddleDirection {
    Left,
    Right,
    Stop,
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal speed when steering
    pub speed: f32,
    /// Current horizontal velocity (-speed, 0 or +speed)
    pub dx: f32,
}

impl Paddle {
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            pos: Vec2::new(
                canvas_width / 2.0 - PADDLE_WIDTH / 2.0,
                canvas_height - PADDLE_BOTTOM_OFFSET,
            ),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
            dx: 0.0,
        }
    }

    pub fn steer(&mut self, direction: PaddleDirection) {
        self.dx = match direction {
            PaddleDirection::Left => -self.speed,
            PaddleDirection::Right => self.speed,
            PaddleDirection::Stop => 0.0,
        };
    }

    /// Move by the current velocity, clamped to the canvas
    pub fn integrate(&mut self, canvas_width: f32) {
        self.pos.x += self.dx;
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
        }
        if self.pos.x + self.width > canvas_width {
            self.pos.x = canvas_width - self.width;
        }
    }

    pub fn recenter(&mut self, canvas_width: f32) {
        self.pos.x = canvas_width / 2.0 - self.width / 2.0;
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// False until the first launch; stays true through deaths and resets
    pub active: bool,
}

impl Ball {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            vel: launch_velocity(0),
            radius: BALL_RADIUS,
            active: false,
        }
    }

    /// Move back to the spawn point with a fresh velocity
    pub fn respawn(&mut self, spawn: Vec2, vel: Vec2) {
        self.pos = spawn;
        self.vel = vel;
    }
}

/// Brick types (only `Normal` is generated)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrickKind {
    #[default]
    Normal,
    Hard,
    Unbreakable,
    Explosive,
}

/// Grid coordinates, unique within one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrickId {
    pub row: u32,
    pub col: u32,
}

impl fmt::Display for BrickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// A brick entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: BrickId,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: BrickKind,
    pub health: u32,
    /// Display hue in degrees (drawn at 70% saturation, 60% lightness)
    pub hue: f32,
    /// Points awarded on destruction
    pub value: u32,
}

impl Brick {
    /// Strict containment: points on the edge are outside
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.pos.x
            && point.x < self.pos.x + self.width
            && point.y > self.pos.y
            && point.y < self.pos.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Cumulative stats fed to achievement predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Bricks broken this session
    pub bricks_broken: u32,
    /// Score of the current run
    pub total_score: u32,
    /// Highest level reached this session
    pub max_level: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            bricks_broken: 0,
            total_score: 0,
            max_level: STARTING_LEVEL,
        }
    }
}

/// Something that happened during a tick or a control call
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BrickBroken { id: BrickId, value: u32 },
    AchievementsUnlocked(Vec<&'static str>),
    NewHighScore(u32),
    LifeLost { lives: u32 },
    GameOver { score: u32 },
    LevelCleared { level: u32 },
    /// Observable state changed; the snapshot is taken at this point
    StateChanged(Snapshot),
}

/// Read-only view of the session for the HUD
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub is_playing: bool,
    pub is_paused: bool,
    pub is_game_over: bool,
    /// Unlocked achievement ids, in unlock order
    pub achievements: Vec<String>,
    pub high_score: u32,
}

/// Complete game state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub width: f32,
    pub height: f32,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Active bricks in insertion order
    pub bricks: Vec<Brick>,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub playing: bool,
    pub paused: bool,
    pub game_over: bool,
    pub stats: GameStats,
    /// Unlocked achievement ids (survives resets)
    pub achievements: Vec<String>,
    pub high_score: HighScore,
}

impl GameState {
    /// Create a fresh session on a canvas of the given size
    pub fn new(width: f32, height: f32) -> Self {
        let mut state = Self {
            width,
            height,
            paddle: Paddle::new(width, height),
            ball: Ball::new(ball_spawn(width, height)),
            bricks: Vec::new(),
            score: 0,
            lives: STARTING_LIVES,
            level: STARTING_LEVEL,
            playing: false,
            paused: false,
            game_over: false,
            stats: GameStats::default(),
            achievements: Vec::new(),
            high_score: HighScore::default(),
        };
        state.init_level(STARTING_LEVEL);
        state
    }

    /// Seed the session with previously persisted progress
    pub fn with_progress(mut self, achievements: Vec<String>, high_score: HighScore) -> Self {
        self.achievements = achievements;
        self.high_score = high_score;
        self
    }

    /// Replace the brick collection with the layout for `level`
    pub fn init_level(&mut self, level: u32) {
        self.bricks = super::tick::generate_level(self.width, level);
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else if self.paused {
            GamePhase::Paused
        } else if self.playing {
            GamePhase::Playing
        } else {
            GamePhase::Idle
        }
    }

    /// Back to level 1 with full lives. Achievements and the session brick
    /// count are kept.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.level = STARTING_LEVEL;
        self.game_over = false;
        self.playing = false;
        self.paused = false;
        self.stats.total_score = 0;

        self.init_level(STARTING_LEVEL);

        self.ball
            .respawn(ball_spawn(self.width, self.height), launch_velocity(0));
        self.paddle.recenter(self.width);
    }

    /// Put ball and paddle back at their spawn points
    pub(crate) fn respawn(&mut self, vel: Vec2) {
        self.ball.respawn(ball_spawn(self.width, self.height), vel);
        self.paddle.recenter(self.width);
    }

    /// Enter play. Resets first after a game over. Returns false if already
    /// playing.
    pub fn begin(&mut self) -> bool {
        if self.game_over {
            self.reset();
        }
        if self.playing {
            return false;
        }
        self.playing = true;
        self.ball.active = true;
        true
    }

    /// Flip the pause flag, returning the new value
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            lives: self.lives,
            level: self.level,
            is_playing: self.playing,
            is_paused: self.paused,
            is_game_over: self.game_over,
            achievements: self.achievements.clone(),
            high_score: self.high_score.best(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        assert_eq!(state.phase(), GamePhase::Idle);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.bricks.len(), 32);
        assert_eq!(state.paddle.pos, Vec2::new(350.0, 570.0));
        assert_eq!(state.ball.pos, Vec2::new(400.0, 550.0));
        assert_eq!(state.ball.vel, Vec2::new(4.0, -4.0));
        assert!(!state.ball.active);
    }

    #[test]
    fn test_paddle_steer_and_clamp() {
        let mut paddle = Paddle::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        paddle.steer(PaddleDirection::Left);
        assert_eq!(paddle.dx, -PADDLE_SPEED);
        for _ in 0..100 {
            paddle.integrate(CANVAS_WIDTH);
        }
        assert_eq!(paddle.pos.x, 0.0);

        paddle.steer(PaddleDirection::Right);
        for _ in 0..200 {
            paddle.integrate(CANVAS_WIDTH);
        }
        assert_eq!(paddle.pos.x, CANVAS_WIDTH - PADDLE_WIDTH);

        paddle.steer(PaddleDirection::Stop);
        assert_eq!(paddle.dx, 0.0);
    }

    #[test]
    fn test_brick_strict_containment() {
        let brick = Brick {
            id: BrickId { row: 0, col: 0 },
            pos: Vec2::new(10.0, 60.0),
            width: 80.0,
            height: 20.0,
            kind: BrickKind::Normal,
            health: 1,
            hue: 0.0,
            value: 100,
        };
        assert!(brick.contains(Vec2::new(50.0, 70.0)));
        assert!(!brick.contains(Vec2::new(10.0, 70.0)));
        assert!(!brick.contains(Vec2::new(50.0, 80.0)));
        assert_eq!(brick.id.to_string(), "0-0");
    }

    #[test]
    fn test_begin_and_pause_flags() {
        let mut state = GameState::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        assert!(state.begin());
        assert!(state.ball.active);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert!(!state.begin());

        assert!(state.toggle_pause());
        assert_eq!(state.phase(), GamePhase::Paused);
        assert!(!state.toggle_pause());
        assert_eq!(state.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_begin_after_game_over_resets() {
        let mut state = GameState::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        state.begin();
        state.score = 700;
        state.lives = 0;
        state.level = 4;
        state.game_over = true;
        state.playing = false;

        assert!(state.begin());
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = GameState::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        state.achievements.push("first_blood".to_string());
        state.begin();
        state.score = 300;
        state.bricks.truncate(5);
        state.ball.pos = Vec2::new(12.0, 34.0);
        state.paddle.pos.x = 0.0;

        state.reset();
        let capture = |s: &GameState| {
            (
                s.snapshot(),
                s.bricks.clone(),
                s.ball.clone(),
                s.paddle.clone(),
            )
        };
        let first = capture(&state);
        state.reset();
        let second = capture(&state);

        assert_eq!(first, second);
        assert_eq!(state.bricks.len(), 32);
        assert_eq!(state.achievements, vec!["first_blood".to_string()]);
    }

    #[test]
    fn test_snapshot_json_field_names() {
        let state = GameState::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"isGameOver\":false"));
        assert!(json.contains("\"highScore\":0"));
    }
}
