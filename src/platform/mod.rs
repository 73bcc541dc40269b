//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Monotonic time (`performance.now()` on web, `Instant` natively)
//! - Frame delta computation

use std::cell::Cell;
use std::rc::Rc;

use crate::clamp;
use crate::consts::MAX_FRAME_DT;

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Hand-driven clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// `std::time::Instant` clock
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// `performance.now()` clock
#[cfg(target_arch = "wasm32")]
pub struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

#[cfg(target_arch = "wasm32")]
impl PerformanceClock {
    pub fn new() -> Self {
        let performance = web_sys::window().and_then(|w| w.performance());
        if performance.is_none() {
            log::warn!("performance.now() unavailable - falling back to Date.now()");
        }
        Self { performance }
    }
}

#[cfg(target_arch = "wasm32")]
impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(p) => p.now(),
            None => js_sys::Date::now(),
        }
    }
}

/// Turns animation-frame timestamps into clamped deltas
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame, in `[0, MAX_FRAME_DT]`.
    /// The first frame yields 0.
    pub fn tick(&mut self, ts_ms: f64) -> f32 {
        let last = self.last_ms.unwrap_or(ts_ms);
        self.last_ms = Some(ts_ms);
        clamp(((ts_ms - last) / 1000.0) as f32, 0.0, MAX_FRAME_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut fc = FrameClock::new();
        assert_eq!(fc.tick(12_345.0), 0.0);
    }

    #[test]
    fn test_dt_clamped() {
        let mut fc = FrameClock::new();
        fc.tick(0.0);
        assert!((fc.tick(16.0) - 0.016).abs() < 1e-6);
        // Tab was hidden for a second
        assert_eq!(fc.tick(1016.0), MAX_FRAME_DT);
        // Timestamps going backwards never produce negative time
        assert_eq!(fc.tick(1000.0), 0.0);
    }

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.advance(250.0);
        assert_eq!(other.now_ms(), 250.0);
        other.set(10.0);
        assert_eq!(clock.now_ms(), 10.0);
    }
}
