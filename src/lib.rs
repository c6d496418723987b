//! Space Shooter - A top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game phases)
//! - `session`: Shell-facing facade (input callbacks, frame ticking, events)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (audio mix)
//! - `autopilot`: Demo/attract-mode input

pub mod autopilot;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (pixels, y grows downward)
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 720.0;

    /// Longest frame the session will simulate in one step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Sprite footprints (width, height) used for bounding boxes and default masks
    pub const PLAYER_SIZE: (u32, u32) = (112, 75);
    pub const METEOR_SIZE: (u32, u32) = (101, 84);
    pub const ENEMY_SIZE: (u32, u32) = (93, 84);
    pub const LASER_SIZE: (u32, u32) = (9, 54);
    pub const ENEMY_LASER_SIZE: (u32, u32) = (9, 54);
    pub const POWER_UP_SIZE: (u32, u32) = (32, 32);

    /// Population caps
    pub const MAX_METEORS: usize = 5;
    pub const MAX_ENEMIES: usize = 3;
    pub const MAX_POWER_UPS: usize = 2;

    /// Spawn timer periods (seconds)
    pub const METEOR_SPAWN_PERIOD: f64 = 1.0;
    pub const ENEMY_SPAWN_PERIOD: f64 = 3.0;
    pub const POWER_UP_SPAWN_PERIOD: f64 = 5.0;

    /// Player defaults
    pub const PLAYER_BASE_SPEED: f32 = 300.0;
    pub const PLAYER_SHOOT_COOLDOWN: f64 = 0.4;
    pub const RAPID_FIRE_COOLDOWN: f64 = 0.2;
    pub const SPEED_BOOST_FACTOR: f32 = 2.0;

    /// Meteor ranges (inclusive)
    pub const METEOR_SPEED_RANGE: (u32, u32) = (400, 500);
    pub const METEOR_ROTATION_RANGE: (u32, u32) = (40, 80);
    /// Horizontal heading drift for meteors and enemies
    pub const HEADING_DRIFT: f32 = 0.5;

    /// Enemy defaults
    pub const ENEMY_SPEED: f32 = 150.0;
    pub const ENEMY_HEALTH: u8 = 2;
    pub const ENEMY_SHOOT_COOLDOWN: f64 = 2.0;

    /// Projectile and pickup speeds
    pub const LASER_SPEED: f32 = 400.0;
    pub const ENEMY_LASER_SPEED: f32 = 400.0;
    pub const POWER_UP_SPEED: f32 = 200.0;

    /// Power-up effect duration (seconds)
    pub const POWER_UP_DURATION: f64 = 5.0;

    /// Score awards
    pub const METEOR_SCORE: u64 = 50;
    pub const ENEMY_SCORE: u64 = 100;
}
