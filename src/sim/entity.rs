//! Shared movable data and axis-aligned rects
//!
//! Every moving object composes a [`Movable`]; per-category behaviour lives in
//! that category's module.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Position, velocity and spawn time of a moving object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Movable {
    /// Sprite center (pixels, y down)
    pub pos: Vec2,
    /// Direction scaled by speed (pixels/s)
    pub vel: Vec2,
    /// Session time at creation (seconds)
    pub spawned_at: f64,
}

impl Movable {
    pub fn new(pos: Vec2, vel: Vec2, spawned_at: f64) -> Self {
        Self {
            pos,
            vel,
            spawned_at,
        }
    }

    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// Axis-aligned rectangle (pixels, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    /// Rect whose bottom edge is centered on `midbottom`
    pub fn from_midbottom(midbottom: Vec2, size: Vec2) -> Self {
        Self {
            min: Vec2::new(midbottom.x - size.x * 0.5, midbottom.y - size.y),
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }
    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }
    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Top edge midpoint
    pub fn midtop(&self) -> Vec2 {
        Vec2::new(self.min.x + self.size.x * 0.5, self.min.y)
    }

    /// Strict overlap; rects that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Bounding box of a `size` sprite rotated by `degrees` around its center
    pub fn rotated_bounds(center: Vec2, size: Vec2, degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        let (s, c) = (s.abs(), c.abs());
        let rotated = Vec2::new(size.x * c + size.y * s, size.x * s + size.y * c);
        Self::from_center(center, rotated)
    }

    /// Completely below the bottom of the screen
    pub fn below_screen(&self) -> bool {
        self.top() > SCREEN_HEIGHT
    }

    /// Completely outside the screen on any side
    pub fn off_screen(&self) -> bool {
        self.right() < 0.0 || self.left() > SCREEN_WIDTH || self.bottom() < 0.0 || self.below_screen()
    }
}
