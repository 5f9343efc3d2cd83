//! Frame clock
//!
//! Turns host timestamps into per-frame deltas. The host supplies time
//! (`performance.now()` on the web, `Instant` natively), so the clock stays
//! deterministic under test.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameClock {
    /// Timestamp of the previous frame (seconds)
    last: Option<f64>,
    /// Largest delta handed out (seconds)
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last: None,
            max_dt: max_dt.max(0.0),
        }
    }

    /// Forget the previous frame; the next delta is zero
    pub fn restart(&mut self) {
        self.last = None;
    }

    /// Seconds since the previous call, clamped to `[0, max_dt]`
    pub fn delta(&mut self, now: f64) -> f32 {
        let dt = match self.last {
            Some(last) => (now - last) as f32,
            None => 0.0,
        };
        self.last = Some(now);

        if dt > self.max_dt {
            log::debug!(
                "Frame took {:.1}ms, clamping to {:.1}ms",
                dt * 1000.0,
                self.max_dt * 1000.0
            );
            self.max_dt
        } else {
            dt.max(0.0)
        }
    }
}
