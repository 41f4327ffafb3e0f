//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Fixed update and collision order
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collectible;
pub mod collision;
pub mod effects;
pub mod enemy;
pub mod entity;
pub mod hazard;
pub mod mask;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::SessionClock;
pub use collectible::{PowerUp, PowerUpKind};
pub use effects::{Explosion, Star};
pub use enemy::{EnemyShip, MovementState};
pub use entity::{Movable, Rect};
pub use hazard::Meteor;
pub use mask::{Mask, MaskSet, masks_collide};
pub use player::{Player, WeaponMode, direction_from_keys};
pub use projectile::{Owner, Projectile};
pub use snapshot::{FrameSnapshot, Hud, SpriteKind, SpriteView};
pub use spawn::Scheduler;
pub use state::{EntityCategory, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
