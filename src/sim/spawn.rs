//! Fixed-interval spawning of meteors, enemy ships and power-ups
//!
//! Three independent timers. They only accumulate time while Playing, and a
//! long frame fires a timer at most once (no burst catch-up).

use glam::Vec2;
use rand::Rng;

use super::state::{GamePhase, GameState, PowerUpKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// A repeating timer driven by frame time
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTimer {
    pub period: f64,
    elapsed: f64,
}

impl SpawnTimer {
    pub fn new(period: f64) -> Self {
        Self {
            period,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds. Returns true if the timer fired.
    pub fn advance(&mut self, dt: f64) -> bool {
        if !(dt > 0.0) {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.period {
            // Drop any extra whole periods instead of queueing them
            self.elapsed %= self.period;
            true
        } else {
            false
        }
    }

    /// Seconds accumulated toward the next fire
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

/// The three spawn timers
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnScheduler {
    pub meteor: SpawnTimer,
    pub enemy: SpawnTimer,
    pub power_up: SpawnTimer,
}

impl SpawnScheduler {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            meteor: SpawnTimer::new(tuning.meteor_spawn_period),
            enemy: SpawnTimer::new(tuning.enemy_spawn_period),
            power_up: SpawnTimer::new(tuning.power_up_spawn_period),
        }
    }
}

/// Advance spawn timers and create whatever is due
pub fn run(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let dt = dt as f64;
    if state.spawner.meteor.advance(dt) {
        spawn_meteor(state);
    }
    if state.spawner.enemy.advance(dt) {
        spawn_enemy(state);
    }
    if state.spawner.power_up.advance(dt) {
        spawn_power_up(state);
    }
}

/// Spawn a meteor above the field unless the meteor cap is reached
pub fn spawn_meteor(state: &mut GameState) -> Option<u32> {
    let tuning = &state.tuning;
    if state.entities.meteor_count() >= tuning.max_meteors {
        return None;
    }
    let rng = &mut state.rng;
    let x = rng.random_range(0..=FIELD_WIDTH as i32) as f32;
    let y = rng.random_range(-200..=-100) as f32;
    let drift = tuning.heading_drift;
    let heading = Vec2::new(rng.random_range(-drift..=drift), 1.0);
    let (lo, hi) = tuning.meteor_speed;
    let speed = rng.random_range(lo..=hi) as f32;
    let (lo, hi) = tuning.meteor_rotation_speed;
    let rotation_speed = rng.random_range(lo..=hi) as f32;

    let id = state
        .entities
        .add_meteor(Vec2::new(x, y), heading, speed, rotation_speed);
    log::debug!("Spawned meteor {id} at ({x}, {y}) speed {speed}");
    Some(id)
}

/// Spawn an enemy ship just above the field unless the enemy cap is reached
pub fn spawn_enemy(state: &mut GameState) -> Option<u32> {
    if state.entities.enemy_count() >= state.tuning.max_enemies {
        return None;
    }
    let rng = &mut state.rng;
    let x = rng.random_range(100..=(FIELD_WIDTH as i32 - 100)) as f32;
    let drift = state.tuning.heading_drift;
    let heading = Vec2::new(rng.random_range(-drift..=drift), 1.0).normalize();

    let id = state
        .entities
        .add_enemy(Vec2::new(x, -50.0), heading, &state.tuning);
    log::debug!("Spawned enemy {id} at x={x}");
    Some(id)
}

/// Spawn a random power-up above the field unless the power-up cap is reached
pub fn spawn_power_up(state: &mut GameState) -> Option<u32> {
    if state.entities.power_up_count() >= state.tuning.max_power_ups {
        return None;
    }
    let rng = &mut state.rng;
    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    let x = rng.random_range(50..=(FIELD_WIDTH as i32 - 50)) as f32;

    let id = state
        .entities
        .add_power_up(Vec2::new(x, -50.0), kind, state.tuning.power_up_speed);
    log::debug!("Spawned {kind:?} power-up {id} at x={x}");
    Some(id)
}
