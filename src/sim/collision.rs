//! Collision detection and resolution
//!
//! Anything touching the player is tested pixel-accurately against masks.
//! Laser hits, and meteor/enemy crashes, use plain bounding boxes: lasers are
//! thin and the generous box is part of the feel.
//!
//! Resolution order is fixed and matters for double-kill and score edge cases:
//! power-up pickup, player lethality, laser/meteor, laser/enemy, meteor/enemy.

use glam::Vec2;

use super::mask::{CollisionMask, Hitboxes};
use super::powerup;
use super::rect::Rect;
use super::state::{
    EnemyLaser, EnemyShip, GameEvent, GamePhase, GameState, Laser, Meteor, Player, PowerUp,
};
use super::tick::enter_game_over;

/// Screen-space footprint of one entity
#[derive(Debug, Clone, Copy)]
pub struct Hitbox<'a> {
    pub rect: Rect,
    pub mask: &'a CollisionMask,
}

impl<'a> Hitbox<'a> {
    fn centered(pos: Vec2, mask: &'a CollisionMask) -> Self {
        Self {
            rect: Rect::from_center(pos, mask.size()),
            mask,
        }
    }
}

/// Entities that occupy space on the field
pub trait Collider {
    fn hitbox<'a>(&self, hitboxes: &'a Hitboxes) -> Hitbox<'a>;
}

/// Entities that can be removed by a collision
pub trait Destructible {
    fn is_alive(&self) -> bool;
    fn destroy(&mut self);
}

impl Collider for Player {
    fn hitbox<'a>(&self, hitboxes: &'a Hitboxes) -> Hitbox<'a> {
        Hitbox::centered(self.pos, &hitboxes.player)
    }
}

impl Collider for Meteor {
    fn hitbox<'a>(&self, hitboxes: &'a Hitboxes) -> Hitbox<'a> {
        Hitbox::centered(self.pos, hitboxes.meteor(self.rotation))
    }
}

impl Collider for EnemyShip {
    fn hitbox<'a>(&self, hitboxes: &'a Hitboxes) -> Hitbox<'a> {
        Hitbox::centered(self.pos, &hitboxes.enemy)
    }
}

impl Collider for Laser {
    fn hitbox<'a>(&self, hitboxes: &'a Hitboxes) -> Hitbox<'a> {
        Hitbox::centered(self.pos, &hitboxes.laser)
    }
}

impl Collider for EnemyLaser {
    fn hitbox<'a>(&self, hitboxes: &'a Hitboxes) -> Hitbox<'a> {
        Hitbox::centered(self.pos, &hitboxes.enemy_laser)
    }
}

impl Collider for PowerUp {
    fn hitbox<'a>(&self, hitboxes: &'a Hitboxes) -> Hitbox<'a> {
        Hitbox::centered(self.pos, &hitboxes.power_up)
    }
}

macro_rules! impl_destructible {
    ($($ty:ty),*) => {
        $(impl Destructible for $ty {
            #[inline]
            fn is_alive(&self) -> bool {
                self.alive
            }

            #[inline]
            fn destroy(&mut self) {
                self.alive = false;
            }
        })*
    };
}

impl_destructible!(Meteor, EnemyShip, Laser, EnemyLaser, PowerUp);

/// Bounding-box overlap
#[inline]
pub fn rects_collide(a: &Hitbox, b: &Hitbox) -> bool {
    a.rect.overlaps(&b.rect)
}

/// Pixel-accurate overlap: boxes must overlap and share at least one solid pixel
pub fn masks_collide(a: &Hitbox, b: &Hitbox) -> bool {
    if !rects_collide(a, b) {
        return false;
    }
    let (ax, ay) = a.rect.pixel_origin();
    let (bx, by) = b.rect.pixel_origin();
    a.mask.overlaps(b.mask, (bx - ax, by - ay))
}

/// Destroy every live member of `group` whose mask touches `target`. Returns the hit count.
fn destroy_mask_hits<T: Collider + Destructible>(
    target: &Hitbox,
    group: &mut [T],
    hitboxes: &Hitboxes,
) -> usize {
    let mut hits = 0;
    for entity in group.iter_mut().filter(|e| e.is_alive()) {
        if masks_collide(target, &entity.hitbox(hitboxes)) {
            entity.destroy();
            hits += 1;
        }
    }
    hits
}

/// Run every interaction for this frame, in order
pub fn resolve_all(state: &mut GameState, now: f64) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let hitboxes = state.hitboxes.clone();

    collect_power_ups(state, &hitboxes, now);
    if !state.player.is_invincible() {
        check_player_hits(state, &hitboxes);
    }
    // Simulation is frozen once the run ends
    if state.phase != GamePhase::Playing {
        return;
    }
    lasers_vs_meteors(state, &hitboxes);
    lasers_vs_enemies(state, &hitboxes);
    meteors_vs_enemies(state, &hitboxes);
}

/// Player picks up every touching power-up, invincible or not
pub fn collect_power_ups(state: &mut GameState, hitboxes: &Hitboxes, now: f64) {
    let player = state.player.hitbox(hitboxes);
    let mut collected = Vec::new();
    for power_up in state.entities.power_ups.iter_mut().filter(|p| p.alive) {
        if masks_collide(&player, &power_up.hitbox(hitboxes)) {
            power_up.alive = false;
            collected.push(power_up.kind);
        }
    }
    for kind in collected {
        powerup::apply(&mut state.player, kind, now, &state.tuning);
        log::debug!("Picked up {kind:?} at t={now:.2}");
        state.emit(GameEvent::PowerUpCollected { kind });
    }
}

/// Meteor, enemy ship, then enemy laser. The first group that touches the player ends the run;
/// later groups are left untouched.
pub fn check_player_hits(state: &mut GameState, hitboxes: &Hitboxes) {
    let player = state.player.hitbox(hitboxes);
    let entities = &mut state.entities;

    let lethal = destroy_mask_hits(&player, &mut entities.meteors, hitboxes) > 0
        || destroy_mask_hits(&player, &mut entities.enemies, hitboxes) > 0
        || destroy_mask_hits(&player, &mut entities.enemy_lasers, hitboxes) > 0;
    if lethal {
        enter_game_over(state);
    }
}

/// Each laser destroys at most one meteor (first by id) and is consumed by it
pub fn lasers_vs_meteors(state: &mut GameState, hitboxes: &Hitboxes) {
    let entities = &mut state.entities;
    let mut explosions = Vec::new();

    for laser in entities.lasers.iter_mut().filter(|l| l.alive) {
        let shot = laser.hitbox(hitboxes);
        let target = entities
            .meteors
            .iter_mut()
            .find(|m| m.alive && rects_collide(&shot, &m.hitbox(hitboxes)));
        if let Some(meteor) = target {
            meteor.alive = false;
            laser.alive = false;
            explosions.push(shot.rect.midtop());
        }
    }

    state.score += state.tuning.meteor_score * explosions.len() as u64;
    for pos in explosions {
        state.emit(GameEvent::Explosion { pos });
    }
}

/// Lasers still alive chip one health off every enemy they touch, then vanish
pub fn lasers_vs_enemies(state: &mut GameState, hitboxes: &Hitboxes) {
    let entities = &mut state.entities;
    let mut events = Vec::new();
    let mut kills = 0u64;

    for laser in entities.lasers.iter_mut().filter(|l| l.alive) {
        let shot = laser.hitbox(hitboxes);
        for enemy in entities.enemies.iter_mut().filter(|e| e.alive) {
            if !rects_collide(&shot, &enemy.hitbox(hitboxes)) {
                continue;
            }
            if enemy.take_damage(1) {
                kills += 1;
                events.push(GameEvent::Explosion { pos: enemy.pos });
                events.push(GameEvent::EnemyDestroyed { id: enemy.id });
            }
            laser.alive = false;
            events.push(GameEvent::Explosion {
                pos: shot.rect.midtop(),
            });
        }
    }

    state.score += state.tuning.enemy_score * kills;
    for event in events {
        if let GameEvent::EnemyDestroyed { id } = event {
            log::debug!("Enemy {id} shot down");
        }
        state.emit(event);
    }
}

/// Meteors crashing into enemies: the enemy takes a hit, the meteor always breaks. No score.
pub fn meteors_vs_enemies(state: &mut GameState, hitboxes: &Hitboxes) {
    let entities = &mut state.entities;
    let mut events = Vec::new();

    for meteor in entities.meteors.iter_mut().filter(|m| m.alive) {
        let rock = meteor.hitbox(hitboxes);
        for enemy in entities.enemies.iter_mut().filter(|e| e.alive) {
            if !rects_collide(&rock, &enemy.hitbox(hitboxes)) {
                continue;
            }
            if enemy.take_damage(1) {
                events.push(GameEvent::Explosion { pos: enemy.pos });
                events.push(GameEvent::EnemyDestroyed { id: enemy.id });
            }
            meteor.alive = false;
            events.push(GameEvent::Explosion { pos: meteor.pos });
        }
    }

    for event in events {
        state.emit(event);
    }
}
