//! Wall-clock frame delta

use std::time::Instant;

use crate::consts::MAX_FRAME_DT;

/// Measures the time between frames, capped so a stall can't explode the
/// substep count
#[derive(Debug, Default)]
pub struct FrameTimer {
    last: Option<Instant>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call; zero on the first frame
    pub fn delta(&mut self) -> f32 {
        self.delta_at(Instant::now())
    }

    pub fn delta_at(&mut self, now: Instant) -> f32 {
        let dt = self
            .last
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f32());
        self.last = Some(now);
        dt.min(MAX_FRAME_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_delta_capped() {
        let mut timer = FrameTimer::new();
        let t0 = Instant::now();
        assert_eq!(timer.delta_at(t0), 0.0);
        let dt = timer.delta_at(t0 + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-4);
        assert_eq!(timer.delta_at(t0 + Duration::from_secs(3)), MAX_FRAME_DT);
    }
}
