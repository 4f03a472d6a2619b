//! Injectable simulation clock.
//!
//! The countdown timer is the one system with a real-time dependency. To
//! keep the frame pipeline a pure, replayable function, time is read from a
//! clock capability injected into `step` and sampled exactly once per frame,
//! never from a global inside a system. Deterministic replay injects a
//! [`ManualClock`]; production servers use [`WallClock`].

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time in epoch milliseconds.
pub trait SimClock {
    /// Current time in milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

/// Real wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl SimClock for WallClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Hand-advanced clock for tests and deterministic replay.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<i64>,
}

impl ManualClock {
    /// Create a clock frozen at `now_ms`.
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
        }
    }

    /// Move the clock forward by `delta_ms`.
    pub fn advance(&self, delta_ms: i64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }

    /// Jump the clock to an absolute time.
    pub fn set(&self, now_ms: i64) {
        self.now_ms.set(now_ms);
    }
}

impl SimClock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }
}
