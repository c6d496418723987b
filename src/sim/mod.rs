//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame time only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod mask;
pub mod motion;
pub mod powerup;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Collider, Destructible, Hitbox, masks_collide, rects_collide, resolve_all};
pub use mask::{CollisionMask, Hitboxes, SpriteMasks};
pub use rect::Rect;
pub use spawn::{SpawnScheduler, SpawnTimer};
pub use state::{
    ActivePowerUps, Clock, EnemyLaser, EnemyShip, EntityStore, GameEvent, GamePhase, GameState,
    Laser, Meteor, Player, PowerUp, PowerUpKind, Shooter, SoundCue,
};
pub use tick::{TickInput, enter_game_over, start_session, tick};
