//! Space Shooter - A 2D arcade survival shooter
//!
//! Core modules:
//! - `sim`: Simulation core (entities, enemy AI, collisions, spawning, game loop tick)
//! - `platform`: Input collaborator and frame timing
//! - `highscores`: Persisted high score
//! - `audio`: Sound trigger collaborator
//! - `tuning`: Data-driven game balance
//! - `settings`: User preferences

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::{FileHighScoreStore, HighScoreError, HighScoreStore, MemoryHighScoreStore};
pub use settings::{ConfigError, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock frame the driver will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Sprite footprints, used for rects and procedural masks
    pub const PLAYER_SIZE: Vec2 = Vec2::new(98.0, 75.0);
    pub const METEOR_SIZE: Vec2 = Vec2::new(101.0, 84.0);
    pub const LASER_SIZE: Vec2 = Vec2::new(9.0, 54.0);
    pub const ENEMY_SIZE: Vec2 = Vec2::new(90.0, 72.0);
    pub const ENEMY_LASER_SIZE: Vec2 = Vec2::new(12.0, 40.0);
    pub const POWER_UP_SIZE: Vec2 = Vec2::new(30.0, 30.0);

    /// Decorative background stars
    pub const STAR_COUNT: usize = 20;

    /// Explosion animation
    pub const EXPLOSION_FRAMES: u32 = 21;
    pub const EXPLOSION_FPS: f32 = 20.0;
}

/// Rotate a screen-space vector counter-clockwise (as seen on screen) by `degrees`.
///
/// Screen space has y pointing down, so a visual CCW turn is a mathematical
/// clockwise turn of the raw coordinates.
#[inline]
pub fn rotate_screen(v: Vec2, degrees: f32) -> Vec2 {
    let (s, c) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * c + v.y * s, -v.x * s + v.y * c)
}

/// Sprite rotation (degrees, CCW on screen) for a vertical sprite travelling along `dir`.
#[inline]
pub fn sprite_rotation(dir: Vec2) -> f32 {
    (-dir.y).atan2(dir.x).to_degrees() - 90.0
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_screen_quarter_turn() {
        // Pointing right, a visual CCW quarter turn points up (negative y)
        let up = rotate_screen(Vec2::new(1.0, 0.0), 90.0);
        assert!(up.x.abs() < 1e-5);
        assert!((up.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sprite_rotation_straight_down() {
        // Travelling straight down: the vertical sprite is turned half a circle
        let rot = sprite_rotation(Vec2::new(0.0, 1.0));
        assert!((wrap_degrees(rot) - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_degrees() {
        assert!((wrap_degrees(370.0) - 10.0).abs() < 1e-4);
        assert!((wrap_degrees(-10.0) - 350.0).abs() < 1e-4);
    }
}
