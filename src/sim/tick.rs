//! Per-frame simulation tick
//!
//! Advances the game state by one step. Order matters: paddle, ball, walls,
//! paddle bounce, bricks, floor, then level clear.

use glam::Vec2;

use super::collision::{
    ball_floor_collision, ball_paddle_collision, ball_wall_collision, find_brick_hit,
    paddle_bounce, reflect_walls,
};
use super::state::{Brick, BrickId, BrickKind, GameEvent, GameState};
use crate::achievements;
use crate::consts::*;
use crate::{ball_spawn, launch_velocity};

/// Advance the game state by one tick, returning what happened in order
pub fn tick(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Don't tick if paused or not playing
    if state.paused || !state.playing {
        return events;
    }

    state.paddle.integrate(state.width);

    if state.ball.active {
        let ball = &mut state.ball;
        ball.pos += ball.vel;

        let wall_hit = ball_wall_collision(ball.pos, ball.radius, state.width);
        ball.vel = reflect_walls(ball.vel, wall_hit);

        if ball_paddle_collision(ball.pos, ball.radius, &state.paddle) {
            ball.vel = paddle_bounce(ball, &state.paddle);
        }

        // At most one brick per tick
        if let Some(index) = find_brick_hit(state.ball.pos, &state.bricks) {
            state.ball.vel.y = -state.ball.vel.y;
            let brick = state.bricks.remove(index);
            score_brick(state, &brick, &mut events);
        }

        if ball_floor_collision(state.ball.pos, state.ball.radius, state.height) {
            handle_death(state, &mut events);
        }
    }

    if state.bricks.is_empty() {
        next_level(state, &mut events);
    }

    events
}

fn score_brick(state: &mut GameState, brick: &Brick, events: &mut Vec<GameEvent>) {
    state.score += brick.value;
    state.stats.bricks_broken += 1;
    state.stats.total_score = state.score;
    log::debug!("Brick {} broken (+{}), score {}", brick.id, brick.value, state.score);
    events.push(GameEvent::BrickBroken {
        id: brick.id,
        value: brick.value,
    });

    if state.high_score.record(state.score) {
        events.push(GameEvent::NewHighScore(state.score));
    }

    check_achievements(state, events);
    events.push(GameEvent::StateChanged(state.snapshot()));
}

fn handle_death(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.lives = state.lives.saturating_sub(1);
    events.push(GameEvent::LifeLost { lives: state.lives });

    if state.lives == 0 {
        state.game_over = true;
        state.playing = false;
        log::info!("Game over at level {} with score {}", state.level, state.score);
        events.push(GameEvent::GameOver { score: state.score });
    } else {
        state.respawn(launch_velocity(0));
    }

    events.push(GameEvent::StateChanged(state.snapshot()));
}

fn next_level(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.level += 1;
    state.stats.max_level = state.stats.max_level.max(state.level);
    log::info!("Level cleared, advancing to level {}", state.level);
    events.push(GameEvent::LevelCleared { level: state.level });

    check_achievements(state, events);

    state.init_level(state.level);
    // Only the ball respawns; the paddle keeps its position
    state.ball.respawn(
        ball_spawn(state.width, state.height),
        launch_velocity(state.level),
    );

    events.push(GameEvent::StateChanged(state.snapshot()));
}

/// Unlock every achievement whose predicate now holds
pub(crate) fn check_achievements(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let unlocked = achievements::evaluate(&state.stats, &state.achievements);
    if unlocked.is_empty() {
        return;
    }
    state
        .achievements
        .extend(unlocked.iter().map(|id| id.to_string()));
    events.push(GameEvent::AchievementsUnlocked(unlocked));
}

/// Brick layout for a level: `3 + level` rows of 8 evenly spaced bricks
pub fn generate_level(canvas_width: f32, level: u32) -> Vec<Brick> {
    let rows = BRICK_BASE_ROWS + level;
    let cols = BRICK_COLS;
    let brick_width = (canvas_width - (cols + 1) as f32 * BRICK_PADDING) / cols as f32;

    let mut bricks = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            bricks.push(Brick {
                id: BrickId { row, col },
                pos: Vec2::new(
                    BRICK_PADDING + col as f32 * (brick_width + BRICK_PADDING),
                    BRICK_PADDING + BRICK_TOP_OFFSET + row as f32 * (BRICK_HEIGHT + BRICK_PADDING),
                ),
                width: brick_width,
                height: BRICK_HEIGHT,
                kind: BrickKind::Normal,
                health: BRICK_HEALTH,
                hue: ((col * 40 + row * 20) % 360) as f32,
                value: BRICK_VALUE,
            });
        }
    }

    log::debug!("Level {}: {} rows x {} cols", level, rows, cols);
    bricks
}
