//! Pixel-accurate collision masks
//!
//! A mask is a bit grid matching a sprite's opaque pixels. Two sprites collide
//! "mask-accurately" when their rects overlap AND at least one pixel is set in
//! both masks at the same screen position.

use std::sync::{Arc, OnceLock};

use glam::Vec2;

use crate::consts::*;

/// Bit grid of opaque sprite pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl CollisionMask {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// Fully opaque rectangle
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Ellipse inscribed in the sprite rect
    pub fn ellipse(width: u32, height: u32) -> Self {
        let (rx, ry) = (width as f32 * 0.5, height as f32 * 0.5);
        Self::from_fn(width, height, |px, py| {
            let nx = (px - rx) / rx;
            let ny = (py - ry) / ry;
            nx * nx + ny * ny <= 1.0
        })
    }

    /// Triangle with its apex at the top-center and base along the bottom edge
    pub fn triangle_up(width: u32, height: u32) -> Self {
        let (cx, h) = (width as f32 * 0.5, height as f32);
        Self::from_fn(width, height, |px, py| (px - cx).abs() <= py / h * cx)
    }

    /// Triangle with its apex at the bottom-center
    pub fn triangle_down(width: u32, height: u32) -> Self {
        let (cx, h) = (width as f32 * 0.5, height as f32);
        Self::from_fn(width, height, |px, py| (px - cx).abs() <= (h - py) / h * cx)
    }

    /// Build from a row-major alpha channel. Pixels with alpha above `threshold` are solid.
    ///
    /// Returns `None` if `alpha` does not hold exactly `width * height` samples.
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8], threshold: u8) -> Option<Self> {
        if alpha.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            bits: alpha.iter().map(|&a| a > threshold).collect(),
        })
    }

    /// Sample `inside` at every pixel center
    fn from_fn(width: u32, height: u32, inside: impl Fn(f32, f32) -> bool) -> Self {
        let mut mask = Self::empty(width, height);
        for y in 0..height {
            for x in 0..width {
                if inside(x as f32 + 0.5, y as f32 + 0.5) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Footprint as a float vector (bounding-box size)
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Bit at (x, y); out-of-range coordinates are empty
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x < self.width && y < self.height {
            self.bits[(y * self.width + x) as usize] = value;
        }
    }

    /// Number of solid pixels
    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Rotate counter-clockwise (as seen on screen) by `degrees`.
    ///
    /// The result grows to the rotated bounding box, so the sprite's rect grows
    /// with it. Sampling is nearest-neighbour.
    pub fn rotated(&self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (w, h) = (self.width as f32, self.height as f32);
        // Trim float noise so 90° turns don't gain a phantom pixel
        let new_w = (w * cos.abs() + h * sin.abs() - 1e-3).ceil().max(1.0);
        let new_h = (w * sin.abs() + h * cos.abs() - 1e-3).ceil().max(1.0);

        let mut out = Self::empty(new_w as u32, new_h as u32);
        for dy in 0..out.height {
            for dx in 0..out.width {
                let ux = dx as f32 + 0.5 - new_w * 0.5;
                let uy = dy as f32 + 0.5 - new_h * 0.5;
                // Inverse rotation back into source space (y points down)
                let sx = ux * cos - uy * sin + w * 0.5;
                let sy = ux * sin + uy * cos + h * 0.5;
                if self.get(sx.floor() as i32, sy.floor() as i32) {
                    out.set(dx, dy, true);
                }
            }
        }
        out
    }

    /// Whether any solid pixel is shared when `other`'s origin sits at `offset`
    /// relative to this mask's origin.
    pub fn overlaps(&self, other: &CollisionMask, offset: (i32, i32)) -> bool {
        let (ox, oy) = offset;
        let x0 = ox.max(0);
        let y0 = oy.max(0);
        let x1 = (self.width as i32).min(ox + other.width as i32);
        let y1 = (self.height as i32).min(oy + other.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }
        (y0..y1).any(|y| (x0..x1).any(|x| self.get(x, y) && other.get(x - ox, y - oy)))
    }
}

/// Source masks for every sprite kind, as handed over by the asset loader
#[derive(Debug, Clone)]
pub struct SpriteMasks {
    pub player: CollisionMask,
    pub meteor: CollisionMask,
    pub enemy: CollisionMask,
    pub laser: CollisionMask,
    pub enemy_laser: CollisionMask,
    pub power_up: CollisionMask,
}

impl SpriteMasks {
    /// Stand-in shapes sized like the shipped sprites (for headless runs and tests)
    pub fn procedural() -> Self {
        let (pw, ph) = PLAYER_SIZE;
        let (mw, mh) = METEOR_SIZE;
        let (ew, eh) = ENEMY_SIZE;
        Self {
            player: CollisionMask::triangle_up(pw, ph),
            meteor: CollisionMask::ellipse(mw, mh),
            enemy: CollisionMask::triangle_down(ew, eh),
            laser: CollisionMask::filled(LASER_SIZE.0, LASER_SIZE.1),
            enemy_laser: CollisionMask::filled(ENEMY_LASER_SIZE.0, ENEMY_LASER_SIZE.1),
            power_up: CollisionMask::ellipse(POWER_UP_SIZE.0, POWER_UP_SIZE.1),
        }
    }
}

/// Per-kind collision data consumed by the simulation.
///
/// Meteors spin, so their mask (and bounding box) is pre-rotated for every
/// whole degree.
#[derive(Debug)]
pub struct Hitboxes {
    pub player: CollisionMask,
    pub enemy: CollisionMask,
    pub laser: CollisionMask,
    pub enemy_laser: CollisionMask,
    pub power_up: CollisionMask,
    meteor_frames: Vec<CollisionMask>,
}

impl Hitboxes {
    pub fn new(masks: SpriteMasks) -> Self {
        let meteor_frames = (0..360).map(|deg| masks.meteor.rotated(deg as f32)).collect();
        Self {
            player: masks.player,
            enemy: masks.enemy,
            laser: masks.laser,
            enemy_laser: masks.enemy_laser,
            power_up: masks.power_up,
            meteor_frames,
        }
    }

    /// Shared procedural hitboxes, built once per process
    pub fn shared_default() -> Arc<Hitboxes> {
        static DEFAULT: OnceLock<Arc<Hitboxes>> = OnceLock::new();
        DEFAULT
            .get_or_init(|| Arc::new(Hitboxes::new(SpriteMasks::procedural())))
            .clone()
    }

    /// Meteor mask at the given rotation (degrees, any range)
    pub fn meteor(&self, rotation: f32) -> &CollisionMask {
        let deg = rotation.rem_euclid(360.0).round() as usize % 360;
        &self.meteor_frames[deg]
    }
}
