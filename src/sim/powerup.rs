//! Timed power-up effects on the player
//!
//! One expiry slot per kind: picking up a kind that is already active
//! refreshes its timer instead of stacking duration.

use super::state::{GameEvent, GameState, Player, PowerUpKind};
use crate::tuning::Tuning;

/// Start (or refresh) `kind` on the player and apply its immediate effect
pub fn apply(player: &mut Player, kind: PowerUpKind, now: f64, tuning: &Tuning) {
    player.power_ups.set(kind, now + tuning.power_up_duration);
    match kind {
        // Immunity is read straight from the active slot
        PowerUpKind::Invincibility => {}
        PowerUpKind::RapidFire => player.shoot_cooldown = tuning.rapid_fire_cooldown,
        PowerUpKind::SpeedBoost => player.speed = player.base_speed * tuning.speed_boost_factor,
    }
}

/// Undo one effect. Touches only the state owned by `kind`.
fn revert(player: &mut Player, kind: PowerUpKind, tuning: &Tuning) {
    player.power_ups.clear(kind);
    match kind {
        PowerUpKind::Invincibility => {}
        PowerUpKind::RapidFire => player.shoot_cooldown = tuning.shoot_cooldown,
        PowerUpKind::SpeedBoost => player.speed = player.base_speed,
    }
}

/// Revert every effect whose expiry is at or before `now`. Returns the kinds that ended.
pub fn expire_stale(player: &mut Player, now: f64, tuning: &Tuning) -> Vec<PowerUpKind> {
    let expired: Vec<PowerUpKind> = player
        .power_ups
        .iter()
        .filter(|&(_, at)| at <= now)
        .map(|(kind, _)| kind)
        .collect();
    for &kind in &expired {
        revert(player, kind, tuning);
    }
    expired
}

/// Frame step: expire stale effects and announce them
pub fn run(state: &mut GameState, now: f64) {
    let expired = expire_stale(&mut state.player, now, &state.tuning);
    for kind in expired {
        log::debug!("{kind:?} expired at t={now:.2}");
        state.emit(GameEvent::PowerUpExpired { kind });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn player() -> (Player, Tuning) {
        let tuning = Tuning::default();
        (Player::new(&tuning), tuning)
    }

    #[test]
    fn test_rapid_fire_window() {
        let (mut p, tuning) = player();
        apply(&mut p, PowerUpKind::RapidFire, 10.0, &tuning);
        assert_eq!(p.shoot_cooldown, RAPID_FIRE_COOLDOWN);
        assert_eq!(p.power_ups.expiry(PowerUpKind::RapidFire), Some(15.0));

        assert!(expire_stale(&mut p, 14.99, &tuning).is_empty());
        assert_eq!(p.shoot_cooldown, RAPID_FIRE_COOLDOWN);

        assert_eq!(expire_stale(&mut p, 15.0, &tuning), vec![PowerUpKind::RapidFire]);
        assert_eq!(p.shoot_cooldown, PLAYER_SHOOT_COOLDOWN);

        // Re-expiry is a no-op
        assert!(expire_stale(&mut p, 20.0, &tuning).is_empty());
        assert_eq!(p.shoot_cooldown, PLAYER_SHOOT_COOLDOWN);
    }

    #[test]
    fn test_speed_boost_doubles_then_reverts() {
        let (mut p, tuning) = player();
        apply(&mut p, PowerUpKind::SpeedBoost, 0.0, &tuning);
        assert_eq!(p.speed, PLAYER_BASE_SPEED * 2.0);
        expire_stale(&mut p, 5.0, &tuning);
        assert_eq!(p.speed, PLAYER_BASE_SPEED);
    }

    #[test]
    fn test_invincibility_flag() {
        let (mut p, tuning) = player();
        assert!(!p.is_invincible());
        apply(&mut p, PowerUpKind::Invincibility, 1.0, &tuning);
        assert!(p.is_invincible());
        expire_stale(&mut p, 6.0, &tuning);
        assert!(!p.is_invincible());
    }

    #[test]
    fn test_repickup_refreshes_without_stacking() {
        let (mut p, tuning) = player();
        apply(&mut p, PowerUpKind::SpeedBoost, 0.0, &tuning);
        apply(&mut p, PowerUpKind::SpeedBoost, 3.0, &tuning);
        assert_eq!(p.power_ups.expiry(PowerUpKind::SpeedBoost), Some(8.0));
        // Not compounded
        assert_eq!(p.speed, PLAYER_BASE_SPEED * 2.0);
        assert!(expire_stale(&mut p, 5.0, &tuning).is_empty());
        assert_eq!(expire_stale(&mut p, 8.0, &tuning).len(), 1);
    }

    #[test]
    fn test_effects_expire_independently() {
        let (mut p, tuning) = player();
        apply(&mut p, PowerUpKind::RapidFire, 0.0, &tuning);
        apply(&mut p, PowerUpKind::SpeedBoost, 2.0, &tuning);
        apply(&mut p, PowerUpKind::Invincibility, 4.0, &tuning);

        assert_eq!(expire_stale(&mut p, 5.0, &tuning), vec![PowerUpKind::RapidFire]);
        assert_eq!(p.shoot_cooldown, PLAYER_SHOOT_COOLDOWN);
        assert_eq!(p.speed, PLAYER_BASE_SPEED * 2.0);
        assert!(p.is_invincible());

        assert_eq!(expire_stale(&mut p, 7.0, &tuning), vec![PowerUpKind::SpeedBoost]);
        assert!(p.is_invincible());
        assert_eq!(expire_stale(&mut p, 9.0, &tuning), vec![PowerUpKind::Invincibility]);
    }

    #[test]
    fn test_run_emits_expiry_events() {
        let mut state = GameState::new(3);
        let tuning = state.tuning.clone();
        apply(&mut state.player, PowerUpKind::RapidFire, 0.0, &tuning);
        run(&mut state, 5.0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PowerUpExpired {
                kind: PowerUpKind::RapidFire
            }]
        );
    }
}
