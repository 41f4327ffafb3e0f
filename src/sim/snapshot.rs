//! Read-only view of a frame for the presentation layer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::WeaponMode;
use super::projectile::Owner;
use super::state::{GamePhase, GameState};

/// Which sprite to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Star,
    Meteor,
    Enemy,
    Laser,
    EnemyLaser,
    PowerUp,
    Explosion,
    Player,
}

/// One sprite placed on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteView {
    pub kind: SpriteKind,
    /// Sprite center
    pub pos: Vec2,
    /// Degrees, CCW on screen
    pub rotation: f32,
    /// Animation frame (explosions), 0 otherwise
    pub frame: u32,
    /// The player blinks while invincible
    pub blinking: bool,
}

impl SpriteView {
    fn still(kind: SpriteKind, pos: Vec2, rotation: f32) -> Self {
        Self {
            kind,
            pos,
            rotation,
            frame: 0,
            blinking: false,
        }
    }
}

/// HUD values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub health: i32,
    pub max_health: i32,
    pub score: u64,
    pub difficulty: u32,
    pub weapon: WeaponMode,
    /// Shown only while an upgrade is running
    pub power_up_active: bool,
    pub high_score: u64,
    /// Set on the game over screen
    pub final_score: Option<u64>,
}

/// Everything the renderer needs for one frame, in draw order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub sprites: Vec<SpriteView>,
    pub hud: Hud,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let mut sprites = Vec::new();
        sprites.extend(
            state
                .stars
                .iter()
                .map(|s| SpriteView::still(SpriteKind::Star, s.pos, 0.0)),
        );

        // Only the starfield shows behind the menu
        if state.phase != GamePhase::StartMenu {
            sprites.extend(
                state
                    .meteors
                    .iter()
                    .map(|m| SpriteView::still(SpriteKind::Meteor, m.body.pos, m.rotation)),
            );
            sprites.extend(
                state
                    .enemies
                    .iter()
                    .map(|e| SpriteView::still(SpriteKind::Enemy, e.pos, 0.0)),
            );
            sprites.extend(state.projectiles.iter().map(|p| {
                let kind = match p.owner {
                    Owner::Player => SpriteKind::Laser,
                    Owner::Enemy => SpriteKind::EnemyLaser,
                };
                SpriteView::still(kind, p.body.pos, p.rotation)
            }));
            sprites.extend(
                state
                    .power_ups
                    .iter()
                    .map(|p| SpriteView::still(SpriteKind::PowerUp, p.body.pos, p.rotation)),
            );
            sprites.extend(state.explosions.iter().map(|e| SpriteView {
                frame: e.frame_index(),
                ..SpriteView::still(SpriteKind::Explosion, e.pos, 0.0)
            }));
            if state.player.alive {
                sprites.push(SpriteView {
                    blinking: state.player.is_invincible(),
                    ..SpriteView::still(SpriteKind::Player, state.player.pos, 0.0)
                });
            }
        }

        Self {
            phase: state.phase,
            sprites,
            hud: Hud {
                health: state.player.health.max(0),
                max_health: state.player.max_health,
                score: state.score(),
                difficulty: state.difficulty(),
                weapon: state.player.weapon,
                power_up_active: state.player.has_power_up(),
                high_score: state.high_score,
                final_score: state.final_score,
            },
        }
    }

    pub fn count(&self, kind: SpriteKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }
}
