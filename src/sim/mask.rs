//! Per-pixel collision masks
//!
//! Sprites with irregular silhouettes collide by their opaque pixels, not
//! their rects. Masks come from sprite alpha channels when the presentation
//! layer supplies them, otherwise from procedural silhouettes of the same
//! footprint.

use glam::Vec2;

use super::entity::Rect;
use crate::consts::*;

/// Alpha values above this count as solid
pub const ALPHA_THRESHOLD: u8 = 127;

/// A width x height grid of solid/empty pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Build from a row-major alpha channel. `None` if the buffer is the wrong size.
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8]) -> Option<Self> {
        if alpha.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            bits: alpha.iter().map(|&a| a > ALPHA_THRESHOLD).collect(),
        })
    }

    /// Fully solid rectangle
    pub fn filled(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    /// Ellipse inscribed in the footprint
    pub fn ellipse(width: u32, height: u32) -> Self {
        let rx = width as f32 * 0.5;
        let ry = height as f32 * 0.5;
        Self::from_fn(width, height, |x, y| {
            let dx = (x as f32 + 0.5 - rx) / rx;
            let dy = (y as f32 + 0.5 - ry) / ry;
            dx * dx + dy * dy <= 1.0
        })
    }

    /// Arrowhead ship silhouette; the nose points up or down
    pub fn ship(width: u32, height: u32, nose_up: bool) -> Self {
        let half = width as f32 * 0.5;
        Self::from_fn(width, height, |x, y| {
            let along = (y as f32 + 0.5) / height as f32;
            let t = if nose_up { along } else { 1.0 - along };
            (x as f32 + 0.5 - half).abs() <= half * t
        })
    }

    /// Centered vertical bar, used for beam-like projectiles
    pub fn bar(width: u32, height: u32, bar_width: u32) -> Self {
        let lo = width.saturating_sub(bar_width) / 2;
        let hi = lo + bar_width;
        Self::from_fn(width, height, |x, _| x >= lo && x < hi)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[(y * self.width + x) as usize]
    }

    /// Number of solid pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Rect of this mask centered on `center`
    pub fn rect_at(&self, center: Vec2) -> Rect {
        Rect::from_center(center, self.size())
    }

    /// Size of [`Mask::rotated`] for the same angle
    pub fn rotated_dims(&self, degrees: f32) -> (u32, u32) {
        let (s, c) = degrees.to_radians().sin_cos();
        let (s, c) = (s.abs(), c.abs());
        let (w, h) = (self.width as f32, self.height as f32);
        // Trim float noise so a quarter turn doesn't grow by a pixel
        let out_w = ((w * c + h * s) - 1e-3).ceil().max(1.0) as u32;
        let out_h = ((w * s + h * c) - 1e-3).ceil().max(1.0) as u32;
        (out_w, out_h)
    }

    /// Mask of the sprite rotated CCW on screen by `degrees`, grown to the rotated bounds
    pub fn rotated(&self, degrees: f32) -> Self {
        let (out_w, out_h) = self.rotated_dims(degrees);
        let out_half = Vec2::new(out_w as f32, out_h as f32) * 0.5;
        let src_half = self.size() * 0.5;
        // Sample back through the inverse turn
        let (s, c) = (-degrees).to_radians().sin_cos();

        Self::from_fn(out_w, out_h, |x, y| {
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - out_half;
            let src = Vec2::new(d.x * c + d.y * s, -d.x * s + d.y * c) + src_half;
            if src.x < 0.0 || src.y < 0.0 {
                return false;
            }
            self.get(src.x as u32, src.y as u32)
        })
    }

    /// True if any solid pixel of `other`, placed at `offset` from this mask's
    /// top-left corner, lands on a solid pixel of this mask
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        let (ox, oy) = offset;
        let x0 = ox.max(0);
        let y0 = oy.max(0);
        let x1 = (ox + other.width as i32).min(self.width as i32);
        let y1 = (oy + other.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }
        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x as u32, y as u32) && other.get((x - ox) as u32, (y - oy) as u32) {
                    return true;
                }
            }
        }
        false
    }
}

/// Pixel-accurate test between two masked sprites placed by their rects
pub fn masks_collide(a: &Mask, a_rect: &Rect, b: &Mask, b_rect: &Rect) -> bool {
    if !a_rect.intersects(b_rect) {
        return false;
    }
    let offset = (
        (b_rect.min.x.floor() - a_rect.min.x.floor()) as i32,
        (b_rect.min.y.floor() - a_rect.min.y.floor()) as i32,
    );
    a.overlaps(b, offset)
}

/// Collision masks for every masked sprite category
#[derive(Debug, Clone)]
pub struct MaskSet {
    pub player: Mask,
    pub meteor: Mask,
    pub enemy: Mask,
    pub enemy_laser: Mask,
    pub power_up: Mask,
}

impl Default for MaskSet {
    /// Procedural silhouettes sized like the shipped sprites
    fn default() -> Self {
        let dims = |v: Vec2| (v.x as u32, v.y as u32);
        let (pw, ph) = dims(PLAYER_SIZE);
        let (mw, mh) = dims(METEOR_SIZE);
        let (ew, eh) = dims(ENEMY_SIZE);
        let (lw, lh) = dims(ENEMY_LASER_SIZE);
        let (uw, uh) = dims(POWER_UP_SIZE);
        Self {
            player: Mask::ship(pw, ph, true),
            meteor: Mask::ellipse(mw, mh),
            enemy: Mask::ship(ew, eh, false),
            enemy_laser: Mask::bar(lw, lh, 6),
            power_up: Mask::ellipse(uw, uh),
        }
    }
}
