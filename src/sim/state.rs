//! Game state and core simulation types
//!
//! Everything a session owns lives in [`GameState`]; systems take it by
//! `&mut` instead of reaching for globals.

use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::mask::Hitboxes;
use super::rect::Rect;
use super::spawn::SpawnScheduler;
use crate::consts::*;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for confirm to restart
    GameOver,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Invincibility,
    RapidFire,
    SpeedBoost,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Invincibility,
        PowerUpKind::RapidFire,
        PowerUpKind::SpeedBoost,
    ];

    #[inline]
    fn index(self) -> usize {
        match self {
            PowerUpKind::Invincibility => 0,
            PowerUpKind::RapidFire => 1,
            PowerUpKind::SpeedBoost => 2,
        }
    }
}

/// One-shot sounds the shell should play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Laser,
    Explosion,
}

/// Who fired a laser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shooter {
    Player,
    Enemy,
}

/// Fire-and-forget notifications for the render/audio shell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh session began (score reset, field cleared)
    SessionStarted,
    LaserFired { by: Shooter, pos: Vec2 },
    /// Spawn an explosion effect here
    Explosion { pos: Vec2 },
    PowerUpCollected { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    EnemyDestroyed { id: u32 },
    GameOver { final_score: u64 },
}

impl GameEvent {
    /// Sound cue that accompanies this event, if any
    pub fn sound(&self) -> Option<SoundCue> {
        match self {
            GameEvent::LaserFired { .. } => Some(SoundCue::Laser),
            GameEvent::Explosion { .. } => Some(SoundCue::Explosion),
            _ => None,
        }
    }
}

/// Monotonic simulation clock, sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Clock {
    now: f64,
}

impl Clock {
    /// Advance by `dt` seconds. Negative or non-finite steps are ignored.
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.now += dt as f64;
        }
    }

    /// Seconds since the state was created
    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }
}

/// Expiry timestamps for the player's active power-ups (one slot per kind)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActivePowerUps {
    expires_at: [Option<f64>; 3],
}

impl ActivePowerUps {
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.expires_at[kind.index()].is_some()
    }

    pub fn expiry(&self, kind: PowerUpKind) -> Option<f64> {
        self.expires_at[kind.index()]
    }

    /// Start or refresh the timer for `kind`
    pub fn set(&mut self, kind: PowerUpKind, expires_at: f64) {
        self.expires_at[kind.index()] = Some(expires_at);
    }

    pub fn clear(&mut self, kind: PowerUpKind) {
        self.expires_at[kind.index()] = None;
    }

    /// Active kinds with their expiry, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (PowerUpKind, f64)> + '_ {
        PowerUpKind::ALL
            .into_iter()
            .filter_map(|kind| self.expiry(kind).map(|at| (kind, at)))
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    /// Sprite center
    pub pos: Vec2,
    /// Movement direction from input (unit length or zero)
    pub direction: Vec2,
    pub base_speed: f32,
    pub speed: f32,
    /// Current minimum time between shots (seconds)
    pub shoot_cooldown: f64,
    /// Clock time of the last shot
    pub last_shot_at: Option<f64>,
    pub power_ups: ActivePowerUps,
    /// Hidden after game over
    pub visible: bool,
}

impl Player {
    /// Fresh ship centered on the field
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
            direction: Vec2::ZERO,
            base_speed: tuning.player_base_speed,
            speed: tuning.player_base_speed,
            shoot_cooldown: tuning.shoot_cooldown,
            last_shot_at: None,
            power_ups: ActivePowerUps::default(),
            visible: true,
        }
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.power_ups.is_active(PowerUpKind::Invincibility)
    }

    /// Time left before the next shot is allowed
    pub fn cooldown_remaining(&self, now: f64) -> f64 {
        match self.last_shot_at {
            Some(at) => (at + self.shoot_cooldown - now).max(0.0),
            None => 0.0,
        }
    }

    pub fn can_shoot(&self, now: f64) -> bool {
        self.cooldown_remaining(now) <= 0.0
    }
}

/// A falling, spinning rock
#[derive(Debug, Clone)]
pub struct Meteor {
    pub id: u32,
    pub pos: Vec2,
    /// Travel direction (normalized when consumed)
    pub heading: Vec2,
    pub speed: f32,
    /// Degrees, counter-clockwise
    pub rotation: f32,
    /// Degrees per second
    pub rotation_speed: f32,
    pub alive: bool,
}

/// An enemy ship drifting down and bouncing off the side walls
#[derive(Debug, Clone)]
pub struct EnemyShip {
    pub id: u32,
    pub pos: Vec2,
    pub heading: Vec2,
    pub speed: f32,
    pub health: u8,
    pub shoot_cooldown: f64,
    pub last_shot_at: Option<f64>,
    pub alive: bool,
}

impl EnemyShip {
    /// Apply damage. Returns true only on the hit that destroys the ship.
    pub fn take_damage(&mut self, amount: u8) -> bool {
        if !self.alive {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.alive = false;
            return true;
        }
        false
    }

    pub fn can_shoot(&self, now: f64) -> bool {
        self.last_shot_at
            .is_none_or(|at| now - at >= self.shoot_cooldown)
    }
}

/// Player laser, travels up
#[derive(Debug, Clone)]
pub struct Laser {
    pub id: u32,
    pub pos: Vec2,
    pub speed: f32,
    pub alive: bool,
}

/// Enemy laser, travels down
#[derive(Debug, Clone)]
pub struct EnemyLaser {
    pub id: u32,
    pub pos: Vec2,
    pub speed: f32,
    pub alive: bool,
}

/// A falling power-up capsule
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub speed: f32,
    pub alive: bool,
}

/// All transient entities, grouped by kind.
///
/// Destruction only flips `alive`; [`EntityStore::compact`] drops dead
/// entries once per frame so systems never iterate a shrinking Vec.
/// Each group stays sorted by id (ids are allocated monotonically).
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    pub meteors: Vec<Meteor>,
    pub enemies: Vec<EnemyShip>,
    pub lasers: Vec<Laser>,
    pub enemy_lasers: Vec<EnemyLaser>,
    pub power_ups: Vec<PowerUp>,
    next_id: u32,
}

impl EntityStore {
    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn meteor_count(&self) -> usize {
        self.meteors.iter().filter(|m| m.alive).count()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    pub fn laser_count(&self) -> usize {
        self.lasers.iter().filter(|l| l.alive).count()
    }

    pub fn enemy_laser_count(&self) -> usize {
        self.enemy_lasers.iter().filter(|l| l.alive).count()
    }

    pub fn power_up_count(&self) -> usize {
        self.power_ups.iter().filter(|p| p.alive).count()
    }

    /// True when no live transient entity remains
    pub fn is_empty(&self) -> bool {
        self.meteor_count() == 0
            && self.enemy_count() == 0
            && self.laser_count() == 0
            && self.enemy_laser_count() == 0
            && self.power_up_count() == 0
    }

    pub fn add_meteor(&mut self, pos: Vec2, heading: Vec2, speed: f32, rotation_speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.meteors.push(Meteor {
            id,
            pos,
            heading,
            speed,
            rotation: 0.0,
            rotation_speed,
            alive: true,
        });
        id
    }

    pub fn add_enemy(&mut self, pos: Vec2, heading: Vec2, tuning: &Tuning) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(EnemyShip {
            id,
            pos,
            heading,
            speed: tuning.enemy_speed,
            health: tuning.enemy_health,
            shoot_cooldown: tuning.enemy_shoot_cooldown,
            last_shot_at: None,
            alive: true,
        });
        id
    }

    pub fn add_laser(&mut self, pos: Vec2, speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.lasers.push(Laser {
            id,
            pos,
            speed,
            alive: true,
        });
        id
    }

    pub fn add_enemy_laser(&mut self, pos: Vec2, speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.enemy_lasers.push(EnemyLaser {
            id,
            pos,
            speed,
            alive: true,
        });
        id
    }

    pub fn add_power_up(&mut self, pos: Vec2, kind: PowerUpKind, speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp {
            id,
            kind,
            pos,
            speed,
            alive: true,
        });
        id
    }

    /// Drop every entity destroyed since the last compaction
    pub fn compact(&mut self) {
        self.meteors.retain(|m| m.alive);
        self.enemies.retain(|e| e.alive);
        self.lasers.retain(|l| l.alive);
        self.enemy_lasers.retain(|l| l.alive);
        self.power_ups.retain(|p| p.alive);
    }

    /// Remove all transient entities (ids keep counting up)
    pub fn clear(&mut self) {
        self.meteors.clear();
        self.enemies.clear();
        self.lasers.clear();
        self.enemy_lasers.clear();
        self.power_ups.clear();
    }
}

/// Complete game state for one process: the current session plus the
/// clock, RNG and spawn timers that outlive it.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// Score frozen at the moment of game over
    pub final_score: u64,
    pub clock: Clock,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub entities: EntityStore,
    pub spawner: SpawnScheduler,
    pub tuning: Tuning,
    pub hitboxes: Arc<Hitboxes>,
    /// Events raised since the shell last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state in the menu with default tuning and hitboxes
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default(), Hitboxes::shared_default())
    }

    /// Create a game state with custom balance. Tuning that would break spawning is rejected.
    pub fn with_config(
        seed: u64,
        tuning: Tuning,
        hitboxes: Arc<Hitboxes>,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning, hitboxes))
    }

    fn build(seed: u64, tuning: Tuning, hitboxes: Arc<Hitboxes>) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            score: 0,
            final_score: 0,
            clock: Clock::default(),
            time_ticks: 0,
            player: Player::new(&tuning),
            entities: EntityStore::default(),
            spawner: SpawnScheduler::new(&tuning),
            tuning,
            hitboxes,
            events: Vec::new(),
        }
    }

    /// The play field in screen space
    pub fn field() -> Rect {
        Rect {
            min: Vec2::ZERO,
            max: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
        }
    }

    /// Start a fresh session: new player, zero score, empty field
    pub fn reset_session(&mut self) {
        self.player = Player::new(&self.tuning);
        self.entities.clear();
        self.score = 0;
        self.final_score = 0;
        self.events.push(GameEvent::SessionStarted);
    }

    #[inline]
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
