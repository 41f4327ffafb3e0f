//! Power-up pickups

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Movable, Rect};
use crate::consts::{POWER_UP_SIZE, SCREEN_WIDTH};
use crate::tuning::Tuning;
use crate::wrap_degrees;

/// Effect granted on pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// +1 health, up to max
    Heal,
    /// Two parallel lasers
    DoubleLaser,
    /// Three parallel lasers
    TripleLaser,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Heal,
        PowerUpKind::DoubleLaser,
        PowerUpKind::TripleLaser,
    ];

    /// Uniformly random kind
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A falling, spinning power-up
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub body: Movable,
    pub rotation: f32,
    pub spin: f32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2, tuning: &Tuning, now: f64) -> Self {
        Self {
            id,
            kind,
            body: Movable::new(pos, Vec2::new(0.0, tuning.power_up_speed), now),
            rotation: 0.0,
            spin: tuning.power_up_spin,
        }
    }

    /// Random kind at a random x near the top of the screen
    pub fn spawn(id: u32, rng: &mut impl Rng, tuning: &Tuning, now: f64) -> Self {
        let margin = tuning.power_up_margin as i32;
        let x = rng.random_range(margin..=(SCREEN_WIDTH as i32 - margin).max(margin)) as f32;
        let kind = PowerUpKind::random(rng);
        Self::new(id, kind, Vec2::new(x, tuning.power_up_spawn_y), tuning, now)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.body.pos, POWER_UP_SIZE)
    }

    /// Fall and spin; returns false once below the screen
    pub fn update(&mut self, dt: f32) -> bool {
        self.body.advance(dt);
        if self.rect().below_screen() {
            return false;
        }
        self.rotation = wrap_degrees(self.rotation + self.spin * dt);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_every_kind_is_rolled() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = [0u32; 3];
        for _ in 0..300 {
            let kind = PowerUpKind::random(&mut rng);
            let idx = PowerUpKind::ALL.iter().position(|k| *k == kind).unwrap();
            seen[idx] += 1;
        }
        // Roughly uniform: each kind shows up a fair share of 300 rolls
        assert!(seen.iter().all(|&n| n > 60), "{seen:?}");
    }

    #[test]
    fn test_spawn_position() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..100 {
            let p = PowerUp::spawn(1, &mut rng, &tuning, 0.0);
            assert!(p.body.pos.x >= 100.0 && p.body.pos.x <= 1180.0);
            assert_eq!(p.body.pos.y, -50.0);
        }
    }
}
