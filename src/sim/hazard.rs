//! Falling, spinning meteors

use glam::Vec2;
use rand::Rng;

use super::entity::{Movable, Rect};
use super::mask::Mask;
use crate::consts::{METEOR_SIZE, SCREEN_WIDTH};
use crate::tuning::Tuning;
use crate::wrap_degrees;

/// Meteors spawn in this band above the screen
pub const METEOR_SPAWN_Y: (i32, i32) = (-200, -100);

/// A meteor. Its speed is fixed at creation from the difficulty of that moment.
#[derive(Debug, Clone)]
pub struct Meteor {
    pub id: u32,
    pub body: Movable,
    /// Current sprite rotation (degrees)
    pub rotation: f32,
    /// Degrees per second
    pub spin: f32,
}

impl Meteor {
    /// Roll a new meteor above the screen for the given difficulty
    pub fn spawn(id: u32, rng: &mut impl Rng, tuning: &Tuning, difficulty: u32, now: f64) -> Self {
        let mult = tuning.hazard_speed_multiplier(difficulty);
        let x = rng.random_range(0..=SCREEN_WIDTH as i32) as f32;
        let y = rng.random_range(METEOR_SPAWN_Y.0..=METEOR_SPAWN_Y.1) as f32;
        let min_speed = (tuning.meteor_min_speed * mult) as i32;
        let max_speed = ((tuning.meteor_max_speed * mult) as i32).max(min_speed);
        let speed = rng.random_range(min_speed..=max_speed) as f32;
        let drift = if tuning.meteor_drift > 0.0 {
            rng.random_range(-tuning.meteor_drift..=tuning.meteor_drift)
        } else {
            0.0
        };
        let (lo, hi) = (tuning.meteor_min_spin, tuning.meteor_max_spin);
        let spin = rng.random_range(lo.min(hi)..=lo.max(hi));
        Self::new(id, Vec2::new(x, y), Vec2::new(drift, 1.0) * speed, spin, now)
    }

    pub fn new(id: u32, pos: Vec2, vel: Vec2, spin: f32, now: f64) -> Self {
        Self {
            id,
            body: Movable::new(pos, vel, now),
            rotation: 0.0,
            spin,
        }
    }

    /// Bounding box of the rotated sprite
    pub fn rect(&self) -> Rect {
        Rect::rotated_bounds(self.body.pos, METEOR_SIZE, self.rotation)
    }

    /// Silhouette at the current rotation
    pub fn mask(&self, base: &Mask) -> Mask {
        base.rotated(self.rotation)
    }

    /// Placement rect of [`Meteor::mask`], without rotating any pixels
    pub fn mask_rect(&self, base: &Mask) -> Rect {
        let (w, h) = base.rotated_dims(self.rotation);
        Rect::from_center(self.body.pos, Vec2::new(w as f32, h as f32))
    }

    /// Fall and spin; returns false once below the screen
    pub fn update(&mut self, dt: f32) -> bool {
        self.body.advance(dt);
        self.rotation = wrap_degrees(self.rotation + self.spin * dt);
        !self.rect().below_screen()
    }
}
