//! Frame delta normalisation
//!
//! Converts successive frame timestamps (ms, as handed out by the host's
//! display-refresh callback) into a dimensionless step where 1.0 is one
//! frame at the 60 Hz reference rate.

use serde::{Deserialize, Serialize};

use crate::consts::REFERENCE_FRAME_MS;

/// Step cap used when none is configured
pub const DEFAULT_MAX_DELTA: f32 = 6.0;

/// Tracks the previous frame timestamp for one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameClock {
    /// Timestamp of the previous frame; `None` until the first frame of a round
    prev_ms: Option<f64>,
    /// Upper bound on a single normalised step
    max_delta: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELTA)
    }
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            prev_ms: None,
            max_delta,
        }
    }

    /// Forget the previous timestamp so the next frame is treated as the first
    pub fn reset(&mut self) {
        self.prev_ms = None;
    }

    /// Whether the next call to [`delta`](Self::delta) is a round's first frame
    pub fn is_first_frame(&self) -> bool {
        self.prev_ms.is_none()
    }

    /// Normalised step for the frame at `now_ms`; records `now_ms` for the next call
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let Some(prev) = self.prev_ms.replace(now_ms) else {
            return 0.0;
        };

        let raw = ((now_ms - prev) / REFERENCE_FRAME_MS) as f32;
        if raw.is_nan() || raw <= 0.0 {
            return 0.0;
        }
        raw.min(self.max_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1000.0 / 60.0;

    #[test]
    fn test_default_clock_advances() {
        let mut clock = FrameClock::default();
        clock.delta(0.0);
        assert!((clock.delta(FRAME) - 1.0).abs() < 1e-5);
        assert_eq!(clock.delta(FRAME + 60_000.0), DEFAULT_MAX_DELTA);
    }

    #[test]
    fn test_first_frame_is_noop() {
        let mut clock = FrameClock::new(6.0);
        assert!(clock.is_first_frame());
        // A huge absolute timestamp must not leak into the first step
        assert_eq!(clock.delta(987_654.0), 0.0);
        assert!(!clock.is_first_frame());
    }

    #[test]
    fn test_one_reference_frame_is_one() {
        let mut clock = FrameClock::new(6.0);
        clock.delta(1000.0);
        let d = clock.delta(1000.0 + FRAME);
        assert!((d - 1.0).abs() < 1e-5);

        // 120 Hz display => half steps
        let d = clock.delta(1000.0 + FRAME + FRAME / 2.0);
        assert!((d - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_reset_rearms_first_frame() {
        let mut clock = FrameClock::new(6.0);
        clock.delta(10.0);
        clock.delta(26.0);
        clock.reset();
        assert_eq!(clock.delta(50_000.0), 0.0);
    }

    #[test]
    fn test_stall_is_clamped_and_backwards_is_zero() {
        let mut clock = FrameClock::new(6.0);
        clock.delta(0.0);
        assert_eq!(clock.delta(5_000.0), 6.0);
        assert_eq!(clock.delta(4_000.0), 0.0);
    }
}
