//! Data-driven game balance
//!
//! Every gameplay number lives here so a JSON file can override it without a
//! rebuild. Missing fields fall back to the defaults in [`crate::consts`].

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// A value that must be strictly positive was not
    NonPositive { field: &'static str },
    /// A value that may be zero but not negative
    Negative { field: &'static str },
    /// An inclusive range whose low end exceeds its high end
    InvertedRange { field: &'static str, low: u32, high: u32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read tuning file: {e}"),
            Self::Parse(e) => write!(f, "invalid tuning JSON: {e}"),
            Self::NonPositive { field } => write!(f, "tuning field `{field}` must be positive"),
            Self::Negative { field } => write!(f, "tuning field `{field}` must not be negative"),
            Self::InvertedRange { field, low, high } => {
                write!(f, "tuning range `{field}` is inverted ({low} > {high})")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Balance knobs for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Population caps ===
    pub max_meteors: usize,
    pub max_enemies: usize,
    pub max_power_ups: usize,

    // === Spawn periods (seconds) ===
    pub meteor_spawn_period: f64,
    pub enemy_spawn_period: f64,
    pub power_up_spawn_period: f64,

    // === Player ===
    pub player_base_speed: f32,
    pub shoot_cooldown: f64,
    pub rapid_fire_cooldown: f64,
    pub speed_boost_factor: f32,
    pub power_up_duration: f64,

    // === Meteors ===
    pub meteor_speed: (u32, u32),
    pub meteor_rotation_speed: (u32, u32),
    pub heading_drift: f32,

    // === Enemies ===
    pub enemy_speed: f32,
    pub enemy_health: u8,
    pub enemy_shoot_cooldown: f64,

    // === Projectiles / pickups ===
    pub laser_speed: f32,
    pub enemy_laser_speed: f32,
    pub power_up_speed: f32,

    // === Scoring ===
    pub meteor_score: u64,
    pub enemy_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_meteors: MAX_METEORS,
            max_enemies: MAX_ENEMIES,
            max_power_ups: MAX_POWER_UPS,

            meteor_spawn_period: METEOR_SPAWN_PERIOD,
            enemy_spawn_period: ENEMY_SPAWN_PERIOD,
            power_up_spawn_period: POWER_UP_SPAWN_PERIOD,

            player_base_speed: PLAYER_BASE_SPEED,
            shoot_cooldown: PLAYER_SHOOT_COOLDOWN,
            rapid_fire_cooldown: RAPID_FIRE_COOLDOWN,
            speed_boost_factor: SPEED_BOOST_FACTOR,
            power_up_duration: POWER_UP_DURATION,

            meteor_speed: METEOR_SPEED_RANGE,
            meteor_rotation_speed: METEOR_ROTATION_RANGE,
            heading_drift: HEADING_DRIFT,

            enemy_speed: ENEMY_SPEED,
            enemy_health: ENEMY_HEALTH,
            enemy_shoot_cooldown: ENEMY_SHOOT_COOLDOWN,

            laser_speed: LASER_SPEED,
            enemy_laser_speed: ENEMY_LASER_SPEED,
            power_up_speed: POWER_UP_SPEED,

            meteor_score: METEOR_SCORE,
            enemy_score: ENEMY_SCORE,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a file. A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        if !path.exists() {
            log::warn!("Tuning file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("meteor_spawn_period", self.meteor_spawn_period),
            ("enemy_spawn_period", self.enemy_spawn_period),
            ("power_up_spawn_period", self.power_up_spawn_period),
            ("shoot_cooldown", self.shoot_cooldown),
            ("rapid_fire_cooldown", self.rapid_fire_cooldown),
            ("power_up_duration", self.power_up_duration),
            ("enemy_shoot_cooldown", self.enemy_shoot_cooldown),
            ("player_base_speed", self.player_base_speed as f64),
            ("speed_boost_factor", self.speed_boost_factor as f64),
            ("enemy_speed", self.enemy_speed as f64),
            ("laser_speed", self.laser_speed as f64),
            ("enemy_laser_speed", self.enemy_laser_speed as f64),
            ("power_up_speed", self.power_up_speed as f64),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field });
            }
        }
        if self.enemy_health == 0 {
            return Err(TuningError::NonPositive { field: "enemy_health" });
        }
        if !(self.heading_drift >= 0.0) {
            return Err(TuningError::Negative { field: "heading_drift" });
        }

        let ranges = [
            ("meteor_speed", self.meteor_speed),
            ("meteor_rotation_speed", self.meteor_rotation_speed),
        ];
        for (field, (low, high)) in ranges {
            if low > high {
                return Err(TuningError::InvertedRange { field, low, high });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.max_meteors, 5);
        assert_eq!(tuning.max_enemies, 3);
        assert_eq!(tuning.max_power_ups, 2);
        assert_eq!(tuning.enemy_health, 2);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{ "max_meteors": 8, "enemy_speed": 90.0 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.max_meteors, 8);
        assert_eq!(tuning.enemy_speed, 90.0);
        assert_eq!(tuning.max_enemies, MAX_ENEMIES);
        assert_eq!(tuning.shoot_cooldown, PLAYER_SHOOT_COOLDOWN);
    }

    #[test]
    fn test_rejects_non_positive_period() {
        let err = Tuning::from_json_str(r#"{ "meteor_spawn_period": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NonPositive { field: "meteor_spawn_period" }
        ));
    }

    #[test]
    fn test_heading_drift_may_be_zero_but_not_negative() {
        let tuning = Tuning::from_json_str(r#"{ "heading_drift": 0.0 }"#).expect("zero drift");
        assert_eq!(tuning.heading_drift, 0.0);

        let err = Tuning::from_json_str(r#"{ "heading_drift": -0.1 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Negative { field: "heading_drift" }));
        assert!(err.to_string().contains("must not be negative"));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = Tuning::from_json_str(r#"{ "meteor_speed": [500, 400] }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::InvertedRange { field: "meteor_speed", low: 500, high: 400 }
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("space_shooter_no_such_tuning.json");
        let tuning = Tuning::load(&path).expect("missing file is not an error");
        assert_eq!(tuning, Tuning::default());
    }
}
