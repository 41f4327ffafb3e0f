//! Visual-only entities: explosions and background stars

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// An explosion animation playing at a fixed spot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    /// Fractional animation frame
    pub frame: f32,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, frame: 0.0 }
    }

    /// Frame index to draw
    pub fn frame_index(&self) -> u32 {
        self.frame as u32
    }

    /// Advance the animation; returns false after the last frame
    pub fn update(&mut self, dt: f32) -> bool {
        self.frame += EXPLOSION_FPS * dt;
        self.frame < EXPLOSION_FRAMES as f32
    }
}

/// A background star
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
}

/// Scatter the background starfield
pub fn scatter_stars(rng: &mut impl Rng, count: usize) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            pos: Vec2::new(
                rng.random_range(0..=SCREEN_WIDTH as i32) as f32,
                rng.random_range(0..=SCREEN_HEIGHT as i32) as f32,
            ),
        })
        .collect()
}
