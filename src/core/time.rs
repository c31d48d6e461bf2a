//! Clock abstraction for testable time-dependent logic
//!
//! Scan timestamps, verification times, statistics windows and cache TTLs all
//! read time through a [`Clock`] so tests can pin and advance it.

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Abstraction over system time
pub trait Clock: Send + Sync {
    /// Current wall-clock time (for record timestamps)
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current monotonic time (for measuring intervals)
    fn instant(&self) -> Instant;
}

/// Production clock using actual system time
#[derive(Debug, Default, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }
}

/// Shared handle to the default system clock
pub fn system_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}

/// Settable clock for deterministic tests
///
/// Both the wall-clock and the monotonic reading move together when the
/// clock is advanced.
#[derive(Debug, Clone)]
pub struct MockClock {
    state: Arc<Mutex<(DateTime<Utc>, Instant)>>,
}

impl MockClock {
    /// Create a mock clock pinned at the given wall-clock time
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            state: Arc::new(Mutex::new((now, Instant::now()))),
        }
    }

    /// Create a mock clock pinned at the current system time
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Advance both readings by the given duration
    pub fn advance(&self, duration: Duration) {
        if let Ok(mut state) = self.state.lock() {
            state.0 += chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::zero());
            state.1 += duration;
        }
    }

    /// Set the wall-clock reading without moving the monotonic one
    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut state) = self.state.lock() {
            state.0 = now;
        }
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.state.lock().map(|s| s.0).unwrap_or_else(|p| p.into_inner().0)
    }

    fn instant(&self) -> Instant {
        self.state.lock().map(|s| s.1).unwrap_or_else(|p| p.into_inner().1)
    }
}
