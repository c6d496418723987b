//! Demo/attract-mode pilot
//!
//! Produces the same [`TickInput`] a human would, so the headless runner
//! exercises the full input path.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{GamePhase, GameState, TickInput};

/// How far above the ship a hazard counts as incoming
const LOOKAHEAD: f32 = 320.0;
/// Half-width of the lane the ship considers its own
const LANE_HALF_WIDTH: f32 = 110.0;
/// Preferred cruising height, as a fraction of the field
const CRUISE_HEIGHT: f32 = 0.8;

/// Decide this frame's input from the current state
pub fn plan(state: &GameState) -> TickInput {
    if state.phase != GamePhase::Playing {
        return TickInput {
            confirm: true,
            ..Default::default()
        };
    }

    let ship = state.player.pos;
    let dx = match nearest_threat(state, ship) {
        Some(threat) => dodge(ship, threat),
        None => {
            // Wander a little so runs don't loop on one column
            let t = state.time_ticks as f32 * 0.01;
            let offset = t.sin() * 40.0 + (t * 0.7).sin() * 20.0;
            let target = pick_target(state, ship).unwrap_or(FIELD_WIDTH / 2.0) + offset;
            ((target - ship.x) / 60.0).clamp(-1.0, 1.0)
        }
    };
    let dy = ((FIELD_HEIGHT * CRUISE_HEIGHT - ship.y) / 60.0).clamp(-1.0, 1.0);

    TickInput {
        confirm: false,
        move_dir: Vec2::new(dx, dy),
        fire: true,
    }
}

/// Closest hazard above the ship in its lane (unless invincible)
fn nearest_threat(state: &GameState, ship: Vec2) -> Option<Vec2> {
    if state.player.is_invincible() {
        return None;
    }
    let entities = &state.entities;
    let hazards = entities
        .meteors
        .iter()
        .filter(|m| m.alive)
        .map(|m| m.pos)
        .chain(entities.enemies.iter().filter(|e| e.alive).map(|e| e.pos))
        .chain(entities.enemy_lasers.iter().filter(|l| l.alive).map(|l| l.pos));

    hazards
        .filter(|h| {
            let above = ship.y - h.y;
            above > -40.0 && above < LOOKAHEAD && (h.x - ship.x).abs() < LANE_HALF_WIDTH
        })
        .min_by(|a, b| {
            a.distance_squared(ship)
                .partial_cmp(&b.distance_squared(ship))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Sidestep away from the threat, or toward open space when cornered
fn dodge(ship: Vec2, threat: Vec2) -> f32 {
    let margin = PLAYER_SIZE.0 as f32;
    let away = if ship.x >= threat.x { 1.0 } else { -1.0 };
    if (away > 0.0 && ship.x > FIELD_WIDTH - margin) || (away < 0.0 && ship.x < margin) {
        -away
    } else {
        away
    }
}

/// X coordinate worth lining up with: a falling power-up first, then the lowest enemy
fn pick_target(state: &GameState, ship: Vec2) -> Option<f32> {
    let entities = &state.entities;
    let power_up = entities
        .power_ups
        .iter()
        .filter(|p| p.alive && p.pos.y > 0.0)
        .map(|p| p.pos.x)
        .min_by(|a, b| {
            (a - ship.x)
                .abs()
                .partial_cmp(&(b - ship.x).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    if power_up.is_some() {
        return power_up;
    }

    entities
        .enemies
        .iter()
        .filter(|e| e.alive && e.pos.y > 0.0)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.pos.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{PowerUpKind, powerup, tick};

    fn playing_state() -> GameState {
        let mut state = GameState::new(17);
        tick(
            &mut state,
            &TickInput {
                confirm: true,
                ..Default::default()
            },
            0.0,
        );
        state
    }

    #[test]
    fn test_confirms_outside_playing() {
        let state = GameState::new(1);
        let input = plan(&state);
        assert!(input.confirm);
        assert!(!input.fire);
    }

    #[test]
    fn test_holds_fire_while_playing() {
        let state = playing_state();
        let input = plan(&state);
        assert!(!input.confirm);
        assert!(input.fire);
    }

    #[test]
    fn test_dodges_meteor_overhead() {
        let mut state = playing_state();
        let ship = state.player.pos;
        state
            .entities
            .add_meteor(ship + Vec2::new(20.0, -150.0), Vec2::Y, 450.0, 50.0);
        let input = plan(&state);
        assert_eq!(input.move_dir.x, -1.0);
    }

    #[test]
    fn test_cornered_ship_dodges_inward() {
        let mut state = playing_state();
        state.player.pos.x = 60.0;
        let ship = state.player.pos;
        let pos = ship + Vec2::new(10.0, -100.0);
        state.entities.add_enemy_laser(pos, ENEMY_LASER_SPEED);
        let input = plan(&state);
        assert_eq!(input.move_dir.x, 1.0);
    }

    #[test]
    fn test_ignores_hazards_when_invincible() {
        let mut state = playing_state();
        let tuning = state.tuning.clone();
        powerup::apply(&mut state.player, PowerUpKind::Invincibility, 0.0, &tuning);
        let ship = state.player.pos;
        state
            .entities
            .add_meteor(ship + Vec2::new(0.0, -100.0), Vec2::Y, 450.0, 50.0);
        assert_eq!(nearest_threat(&state, ship), None);
    }

    #[test]
    fn test_chases_power_up_when_clear() {
        let mut state = playing_state();
        let ship = state.player.pos;
        state.entities.add_power_up(
            Vec2::new(ship.x + 400.0, 200.0),
            PowerUpKind::RapidFire,
            POWER_UP_SPEED,
        );
        let input = plan(&state);
        assert!(input.move_dir.x > 0.0);
    }
}
