//! Fixed per-frame simulation step and phase transitions
//!
//! Frame order while Playing: spawn, move, fire, power-up expiry,
//! collisions, compaction. Menu and GameOver only watch for confirm.

use glam::Vec2;

use super::collision;
use super::motion;
use super::powerup;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start / restart (one-shot)
    pub confirm: bool,
    /// Desired movement; normalized before use
    pub move_dir: Vec2,
    /// Fire button held
    pub fire: bool,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("Ignoring invalid frame time {dt}");
        0.0
    };
    state.clock.advance(dt);
    state.time_ticks += 1;

    if input.confirm && state.phase != GamePhase::Playing {
        start_session(state);
    }
    if state.phase != GamePhase::Playing {
        return;
    }

    state.player.direction = movement_direction(input.move_dir);
    let now = state.clock.now();

    spawn::run(state, dt);
    motion::advance_all(state, dt);
    motion::fire_weapons(state, input.fire, now);
    powerup::run(state, now);
    collision::resolve_all(state, now);
    state.entities.compact();
}

fn movement_direction(raw: Vec2) -> Vec2 {
    if raw.is_finite() {
        raw.normalize_or_zero()
    } else {
        log::warn!("Ignoring non-finite move input {raw}");
        Vec2::ZERO
    }
}

/// Menu/GameOver -> Playing with a fresh session
pub fn start_session(state: &mut GameState) {
    let from = state.phase;
    state.reset_session();
    state.phase = GamePhase::Playing;
    log::info!("Session started from {from:?} (seed {})", state.seed);
}

/// Playing -> GameOver: freeze the score and hide the ship
pub fn enter_game_over(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.phase = GamePhase::GameOver;
    state.final_score = state.score;
    state.player.visible = false;
    log::info!("Game over, final score {}", state.final_score);
    state.emit(GameEvent::GameOver {
        final_score: state.final_score,
    });
}
