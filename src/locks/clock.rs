//! Time sources for lock timestamps.

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;
use std::time::Instant;

/// A point in time read from both the wall clock and the monotonic clock.
///
/// `wall` is what gets displayed; elapsed times are always measured on
/// `mono`, which never moves backwards when the wall clock is stepped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub wall: DateTime<Utc>,
    pub mono: Instant,
}

impl Timestamp {
    /// Monotonic time elapsed from `earlier` to `self`, zero if `earlier` is later.
    pub fn since(&self, earlier: &Timestamp) -> Duration {
        let elapsed = self.mono.saturating_duration_since(earlier.mono);
        Duration::from_std(elapsed).unwrap_or(Duration::MAX)
    }
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// The system wall and monotonic clocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp {
            wall: Utc::now(),
            mono: Instant::now(),
        }
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(Timestamp {
                wall: start,
                mono: Instant::now(),
            }),
        }
    }

    /// Let `step` of time pass on both clocks.
    ///
    /// The monotonic reading ignores negative steps.
    pub fn advance(&self, step: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poison| poison.into_inner());
        now.wall += step;
        now.mono += step.to_std().unwrap_or_default();
    }

    /// Step only the wall clock, as an NTP correction would.
    pub fn step_wall(&self, step: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poison| poison.into_inner());
        now.wall += step;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
