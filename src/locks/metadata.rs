//! Per-lock metadata.

use super::clock::Timestamp;
use chrono::Duration;

/// Metadata kept for a held reference.
///
/// Presence of an entry in the table is the only signal that a reference is
/// locked; the entry itself only records when that happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEntry {
    /// Timestamp when the lock was acquired.
    pub since: Timestamp,
}

impl LockEntry {
    pub fn new(since: Timestamp) -> Self {
        Self { since }
    }

    /// Time elapsed between acquisition and `now`, on the monotonic clock.
    pub fn held_for(&self, now: &Timestamp) -> Duration {
        now.since(&self.since)
    }

    /// Format the hold time as a human-readable string.
    pub fn age_string(&self, now: &Timestamp) -> String {
        format_age(self.held_for(now))
    }

    /// Check if the lock has been held at least `stale_minutes`.
    ///
    /// A threshold of 0 disables staleness.
    pub fn is_stale(&self, now: &Timestamp, stale_minutes: u32) -> bool {
        stale_minutes > 0 && self.held_for(now).num_minutes() >= stale_minutes as i64
    }
}

pub(super) fn format_age(age: Duration) -> String {
    let minutes = age.num_minutes();
    let hours = age.num_hours();
    let days = age.num_days();

    if days > 0 {
        format!("{}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}ms", age.num_milliseconds())
    }
}
