//! Per-frame kinematics and weapon fire
//!
//! Each kind follows its own rule; anything that leaves the field is marked
//! dead here and compacted at the end of the frame.

use glam::Vec2;

use super::rect::{Rect, clamp_center};
use super::state::{GameEvent, GameState, Shooter};
use crate::consts::*;

/// Move every gameplay entity by one frame
pub fn advance_all(state: &mut GameState, dt: f32) {
    advance_player(state, dt);
    advance_meteors(state, dt);
    advance_enemies(state, dt);
    advance_projectiles(state, dt);
}

/// Move the player along its input direction and keep the whole sprite on the field
pub fn advance_player(state: &mut GameState, dt: f32) {
    let player = &mut state.player;
    let size = state.hitboxes.player.size();
    let next = player.pos + player.direction * player.speed * dt;
    player.pos = clamp_center(next, size, &GameState::field());
}

/// Meteors fall along their heading and spin; they never bounce
pub fn advance_meteors(state: &mut GameState, dt: f32) {
    let hitboxes = &state.hitboxes;
    for meteor in state.entities.meteors.iter_mut().filter(|m| m.alive) {
        meteor.pos += meteor.heading.normalize_or_zero() * meteor.speed * dt;
        meteor.rotation = (meteor.rotation + meteor.rotation_speed * dt).rem_euclid(360.0);

        let size = hitboxes.meteor(meteor.rotation).size();
        if Rect::from_center(meteor.pos, size).top() > FIELD_HEIGHT {
            meteor.alive = false;
        }
    }
}

/// Enemies drift down and reflect off the side walls
pub fn advance_enemies(state: &mut GameState, dt: f32) {
    let size = state.hitboxes.enemy.size();
    for enemy in state.entities.enemies.iter_mut().filter(|e| e.alive) {
        enemy.pos += enemy.heading * enemy.speed * dt;

        let rect = Rect::from_center(enemy.pos, size);
        if rect.left() < 0.0 {
            enemy.heading.x = enemy.heading.x.abs();
        } else if rect.right() > FIELD_WIDTH {
            enemy.heading.x = -enemy.heading.x.abs();
        }
        if rect.top() > FIELD_HEIGHT {
            enemy.alive = false;
        }
    }
}

/// Lasers fly straight; power-ups fall straight
pub fn advance_projectiles(state: &mut GameState, dt: f32) {
    let hb = &state.hitboxes;
    let entities = &mut state.entities;

    let laser_size = hb.laser.size();
    for laser in entities.lasers.iter_mut().filter(|l| l.alive) {
        laser.pos.y -= laser.speed * dt;
        if Rect::from_center(laser.pos, laser_size).bottom() < 0.0 {
            laser.alive = false;
        }
    }

    let enemy_laser_size = hb.enemy_laser.size();
    for laser in entities.enemy_lasers.iter_mut().filter(|l| l.alive) {
        laser.pos.y += laser.speed * dt;
        if Rect::from_center(laser.pos, enemy_laser_size).top() > FIELD_HEIGHT {
            laser.alive = false;
        }
    }

    let power_up_size = hb.power_up.size();
    for power_up in entities.power_ups.iter_mut().filter(|p| p.alive) {
        power_up.pos.y += power_up.speed * dt;
        if Rect::from_center(power_up.pos, power_up_size).top() > FIELD_HEIGHT {
            power_up.alive = false;
        }
    }
}

/// Fire the player's laser (if held and off cooldown) and every enemy whose cooldown elapsed
pub fn fire_weapons(state: &mut GameState, fire_held: bool, now: f64) {
    let hb = state.hitboxes.clone();

    if fire_held && state.player.visible && state.player.can_shoot(now) {
        let ship = Rect::from_center(state.player.pos, hb.player.size());
        let laser = Rect::from_midbottom(ship.midtop(), hb.laser.size());
        state
            .entities
            .add_laser(laser.center(), state.tuning.laser_speed);
        state.player.last_shot_at = Some(now);
        state.emit(GameEvent::LaserFired {
            by: Shooter::Player,
            pos: ship.midtop(),
        });
    }

    let enemy_size = hb.enemy.size();
    let muzzles: Vec<Vec2> = state
        .entities
        .enemies
        .iter_mut()
        .filter(|e| e.alive && e.can_shoot(now))
        .map(|enemy| {
            enemy.last_shot_at = Some(now);
            Rect::from_center(enemy.pos, enemy_size).midbottom()
        })
        .collect();

    for muzzle in muzzles {
        let laser = Rect::from_midtop(muzzle, hb.enemy_laser.size());
        state
            .entities
            .add_enemy_laser(laser.center(), state.tuning.enemy_laser_speed);
        state.emit(GameEvent::LaserFired {
            by: Shooter::Enemy,
            pos: muzzle,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;
    use proptest::prelude::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(11);
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_player_moves_at_speed() {
        let mut state = playing_state();
        let start = state.player.pos;
        state.player.direction = Vec2::X;
        advance_player(&mut state, 0.5);
        assert_eq!(state.player.pos, start + Vec2::new(PLAYER_BASE_SPEED * 0.5, 0.0));
    }

    #[test]
    fn test_player_clamped_to_field() {
        let mut state = playing_state();
        state.player.direction = Vec2::new(-1.0, -1.0).normalize();
        advance_player(&mut state, 60.0);
        let (w, h) = PLAYER_SIZE;
        assert_eq!(state.player.pos, Vec2::new(w as f32 / 2.0, h as f32 / 2.0));
    }

    #[test]
    fn test_meteor_falls_spins_and_leaves() {
        let mut state = playing_state();
        state
            .entities
            .add_meteor(Vec2::new(100.0, 0.0), Vec2::new(0.0, 1.0), 400.0, 60.0);
        advance_meteors(&mut state, 0.5);
        let m = &state.entities.meteors[0];
        assert_eq!(m.pos, Vec2::new(100.0, 200.0));
        assert_eq!(m.rotation, 30.0);
        assert!(m.alive);

        state.entities.meteors[0].pos.y = FIELD_HEIGHT + 200.0;
        advance_meteors(&mut state, 0.0);
        assert!(!state.entities.meteors[0].alive);
    }

    #[test]
    fn test_meteor_heading_is_normalized() {
        let mut state = playing_state();
        state
            .entities
            .add_meteor(Vec2::new(500.0, 0.0), Vec2::new(0.5, 1.0), 100.0, 40.0);
        advance_meteors(&mut state, 1.0);
        let travelled = state.entities.meteors[0].pos - Vec2::new(500.0, 0.0);
        assert!((travelled.length() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_enemy_reflects_off_walls() {
        let mut state = playing_state();
        let tuning = state.tuning.clone();
        state
            .entities
            .add_enemy(Vec2::new(30.0, 100.0), Vec2::new(-0.6, 0.8), &tuning);
        advance_enemies(&mut state, 0.1);
        let enemy = &state.entities.enemies[0];
        assert!(enemy.heading.x > 0.0);
        assert_eq!(enemy.heading.y, 0.8);

        state.entities.enemies[0].pos.x = FIELD_WIDTH - 10.0;
        advance_enemies(&mut state, 0.1);
        assert!(state.entities.enemies[0].heading.x < 0.0);
    }

    #[test]
    fn test_enemy_removed_below_field() {
        let mut state = playing_state();
        let tuning = state.tuning.clone();
        state
            .entities
            .add_enemy(Vec2::new(600.0, FIELD_HEIGHT + 100.0), Vec2::Y, &tuning);
        advance_enemies(&mut state, 0.01);
        assert_eq!(state.entities.enemy_count(), 0);
    }

    #[test]
    fn test_projectiles_leave_field() {
        let mut state = playing_state();
        state.entities.add_laser(Vec2::new(10.0, 20.0), LASER_SPEED);
        state
            .entities
            .add_enemy_laser(Vec2::new(10.0, FIELD_HEIGHT - 20.0), ENEMY_LASER_SPEED);
        state.entities.add_power_up(
            Vec2::new(10.0, 300.0),
            crate::sim::PowerUpKind::SpeedBoost,
            POWER_UP_SPEED,
        );
        advance_projectiles(&mut state, 0.25);
        assert_eq!(state.entities.laser_count(), 0);
        assert_eq!(state.entities.enemy_laser_count(), 0);
        assert_eq!(state.entities.power_ups[0].pos.y, 350.0);
        assert_eq!(state.entities.power_up_count(), 1);
    }

    #[test]
    fn test_player_fire_respects_cooldown() {
        let mut state = playing_state();
        fire_weapons(&mut state, true, 1.0);
        assert_eq!(state.entities.laser_count(), 1);
        fire_weapons(&mut state, true, 1.2);
        assert_eq!(state.entities.laser_count(), 1);
        fire_weapons(&mut state, false, 1.5);
        assert_eq!(state.entities.laser_count(), 1);
        fire_weapons(&mut state, true, 1.5);
        assert_eq!(state.entities.laser_count(), 2);

        // Laser sits on the ship's nose
        let laser = &state.entities.lasers[0];
        let ship_top = state.player.pos.y - PLAYER_SIZE.1 as f32 / 2.0;
        assert_eq!(laser.pos.x, state.player.pos.x);
        assert_eq!(laser.pos.y, ship_top - LASER_SIZE.1 as f32 / 2.0);
        let sounds = state.events.iter().filter(|e| e.sound().is_some()).count();
        assert_eq!(sounds, 2);
    }

    #[test]
    fn test_hidden_player_cannot_fire() {
        let mut state = playing_state();
        state.player.visible = false;
        fire_weapons(&mut state, true, 1.0);
        assert_eq!(state.entities.laser_count(), 0);
    }

    #[test]
    fn test_enemy_fires_immediately_then_every_cooldown() {
        let mut state = playing_state();
        let tuning = state.tuning.clone();
        state
            .entities
            .add_enemy(Vec2::new(600.0, 100.0), Vec2::Y, &tuning);
        fire_weapons(&mut state, false, 0.5);
        assert_eq!(state.entities.enemy_laser_count(), 1);
        fire_weapons(&mut state, false, 2.0);
        assert_eq!(state.entities.enemy_laser_count(), 1);
        fire_weapons(&mut state, false, 2.5);
        assert_eq!(state.entities.enemy_laser_count(), 2);

        let shot = &state.entities.enemy_lasers[0];
        let muzzle_y = 100.0 + ENEMY_SIZE.1 as f32 / 2.0;
        assert_eq!(shot.pos.y, muzzle_y + ENEMY_LASER_SIZE.1 as f32 / 2.0);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_field(
            moves in prop::collection::vec((-1.0f32..1.0, -1.0f32..1.0, 0.0f32..0.5), 1..50),
            boosted in any::<bool>(),
        ) {
            let mut state = playing_state();
            if boosted {
                state.player.speed = state.player.base_speed * SPEED_BOOST_FACTOR;
            }
            let (w, h) = (PLAYER_SIZE.0 as f32 / 2.0, PLAYER_SIZE.1 as f32 / 2.0);
            for (x, y, dt) in moves {
                state.player.direction = Vec2::new(x, y).normalize_or_zero();
                advance_player(&mut state, dt);
                let p = state.player.pos;
                prop_assert!(p.x >= w && p.x <= FIELD_WIDTH - w);
                prop_assert!(p.y >= h && p.y <= FIELD_HEIGHT - h);
            }
        }
    }
}
