//! Platform abstraction layer
//!
//! Handles the pieces the simulation must not touch directly:
//! - Keyboard state and key-down events
//! - Wall-clock frame timing

pub mod frame_timer;
pub mod input;

pub use frame_timer::FrameTimer;
pub use input::{InputState, Key};
