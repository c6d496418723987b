//! Axis-aligned rectangles for sprite bounding boxes
//!
//! Screen space: origin top-left, y grows downward. A rect is stored as its
//! min/max corners so edge queries stay cheap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rect of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Rect whose top edge midpoint sits at `pos`
    pub fn from_midtop(pos: Vec2, size: Vec2) -> Self {
        Self::from_center(Vec2::new(pos.x, pos.y + size.y * 0.5), size)
    }

    /// Rect whose bottom edge midpoint sits at `pos`
    pub fn from_midbottom(pos: Vec2, size: Vec2) -> Self {
        Self::from_center(Vec2::new(pos.x, pos.y - size.y * 0.5), size)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn midtop(&self) -> Vec2 {
        Vec2::new(self.center().x, self.top())
    }

    pub fn midbottom(&self) -> Vec2 {
        Vec2::new(self.center().x, self.bottom())
    }

    /// Strict overlap: rects that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Whether the rect lies entirely inside `bounds` (edges inclusive)
    #[cfg(test)]
    pub fn within(&self, bounds: &Rect) -> bool {
        self.min.x >= bounds.min.x
            && self.min.y >= bounds.min.y
            && self.max.x <= bounds.max.x
            && self.max.y <= bounds.max.y
    }

    /// Integer pixel origin, used to align collision masks
    pub fn pixel_origin(&self) -> (i32, i32) {
        (self.min.x.round() as i32, self.min.y.round() as i32)
    }
}

/// Clamp a center point so a box of `size` stays inside `bounds`.
///
/// If the box is larger than the bounds on an axis it is centered on that axis.
pub fn clamp_center(center: Vec2, size: Vec2, bounds: &Rect) -> Vec2 {
    let half = size * 0.5;
    let lo = bounds.min + half;
    let hi = bounds.max - half;
    let axis = |v: f32, lo: f32, hi: f32| {
        if lo > hi { (lo + hi) * 0.5 } else { v.clamp(lo, hi) }
    };
    Vec2::new(axis(center.x, lo.x, hi.x), axis(center.y, lo.y, hi.y))
}
