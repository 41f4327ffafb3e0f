//! Player and enemy lasers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Movable, Rect};
use super::mask::Mask;
use crate::consts::LASER_SIZE;
use crate::sprite_rotation;

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// A laser bolt travelling in a straight line
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub owner: Owner,
    pub body: Movable,
    /// Sprite rotation (degrees, CCW on screen)
    pub rotation: f32,
    /// Rotated silhouette for enemy bolts; player bolts collide by rect
    pub mask: Option<Mask>,
}

impl Projectile {
    /// Player laser whose bottom edge sits at `muzzle`, flying straight up
    pub fn player_laser(id: u32, muzzle: Vec2, speed: f32, now: f64) -> Self {
        let center = Rect::from_midbottom(muzzle, LASER_SIZE).center();
        Self {
            id,
            owner: Owner::Player,
            body: Movable::new(center, Vec2::new(0.0, -speed), now),
            rotation: 0.0,
            mask: None,
        }
    }

    /// Enemy laser centered at `pos`, flying along unit `dir`
    pub fn enemy_laser(id: u32, pos: Vec2, dir: Vec2, speed: f32, base_mask: &Mask, now: f64) -> Self {
        let rotation = sprite_rotation(dir);
        Self {
            id,
            owner: Owner::Enemy,
            body: Movable::new(pos, dir * speed, now),
            rotation,
            mask: Some(base_mask.rotated(rotation)),
        }
    }

    pub fn rect(&self) -> Rect {
        match &self.mask {
            Some(mask) => mask.rect_at(self.body.pos),
            None => Rect::from_center(self.body.pos, LASER_SIZE),
        }
    }

    /// Advance; returns false once the bolt has left the screen
    pub fn update(&mut self, dt: f32) -> bool {
        self.body.advance(dt);
        let rect = self.rect();
        match self.owner {
            Owner::Player => rect.bottom() >= 0.0,
            Owner::Enemy => !rect.off_screen(),
        }
    }
}
