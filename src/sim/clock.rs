//! Session time accounting
//!
//! Wall time keeps running while paused; the paused share is tracked and
//! subtracted so score and difficulty only count time actually played.

use serde::{Deserialize, Serialize};

/// Pause-aware session clock (seconds)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionClock {
    /// Wall time since the session started
    wall: f64,
    /// Sum of completed pauses
    paused_total: f64,
    /// Wall time at which the current pause began
    paused_since: Option<f64>,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance wall time by one frame
    pub fn advance(&mut self, dt: f64) {
        self.wall += dt;
    }

    pub fn pause(&mut self) {
        if self.paused_since.is_none() {
            self.paused_since = Some(self.wall);
        }
    }

    pub fn resume(&mut self) {
        if let Some(since) = self.paused_since.take() {
            self.paused_total += self.wall - since;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_since.is_some()
    }

    pub fn wall(&self) -> f64 {
        self.wall
    }

    /// All paused time so far, including a pause in progress
    pub fn paused(&self) -> f64 {
        self.paused_total + self.paused_since.map_or(0.0, |since| self.wall - since)
    }

    /// Played time: wall minus paused
    pub fn elapsed(&self) -> f64 {
        self.wall - self.paused()
    }

    /// Score for the time played so far: one point per 100 ms
    pub fn score(&self) -> u64 {
        (self.elapsed() * 10.0).floor().max(0.0) as u64
    }
}
