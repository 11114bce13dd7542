//! Frame clock
//!
//! Turns the monotonic timestamps handed to each animation frame into
//! elapsed seconds for the simulation.

use crate::consts::MAX_FRAME_DT;

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call, clamped to `[0, MAX_FRAME_DT]`
    ///
    /// The first call returns 0.
    pub fn elapsed(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, MAX_FRAME_DT)
    }

    /// Forget the previous timestamp (after a pause or restart)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.elapsed(12_345.0), 0.0);
    }

    #[test]
    fn test_elapsed_seconds() {
        let mut clock = FrameClock::new();
        clock.elapsed(1000.0);
        let dt = clock.elapsed(1016.0);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_long_gap_clamped() {
        let mut clock = FrameClock::new();
        clock.elapsed(0.0);
        assert_eq!(clock.elapsed(5000.0), MAX_FRAME_DT);
    }

    #[test]
    fn test_backwards_time_clamped() {
        let mut clock = FrameClock::new();
        clock.elapsed(1000.0);
        assert_eq!(clock.elapsed(900.0), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.elapsed(1000.0);
        clock.reset();
        assert_eq!(clock.elapsed(3000.0), 0.0);
    }
}
