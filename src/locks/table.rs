//! Lock acquisition, release, and inspection.

use super::clock::{Clock, SystemClock};
use super::guard::RefLockGuard;
use super::metadata::LockEntry;
use super::types::{LockInfo, ScopeKey};
use crate::config::LockConfig;
use crate::error::{RefLockError, Result};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// In-memory table of held content references.
///
/// One table is shared by every store that should see the same locks,
/// typically behind an `Arc` handed to each store at construction. Separate
/// tables never observe each other.
#[derive(Debug)]
pub struct RefLockTable<C: Clock = SystemClock> {
    entries: Mutex<HashMap<ScopeKey, LockEntry>>,
    config: LockConfig,
    clock: C,
}

impl RefLockTable<SystemClock> {
    /// Create an empty table with default configuration.
    pub fn new() -> Self {
        Self::with_config(LockConfig::default())
    }

    /// Create an empty table using the given configuration.
    pub fn with_config(config: LockConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for RefLockTable<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> RefLockTable<C> {
    /// Create an empty table that timestamps locks with `clock`.
    pub fn with_clock(config: LockConfig, clock: C) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            config,
            clock,
        }
    }

    /// Poisoning is ignored: each critical section is a single lookup,
    /// insert, or remove.
    fn entries(&self) -> MutexGuard<'_, HashMap<ScopeKey, LockEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    /// Try to lock `reference` within `root` without waiting.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The reference is now held; pair with [`release`](Self::release)
    /// * `Err(RefLockError::Unavailable)` - Already held; carries the hold time
    pub fn try_acquire(&self, root: &str, reference: &str) -> Result<()> {
        self.acquire_entry(root, reference).map(|_| ())
    }

    /// Try to lock `reference` and return a guard that releases it on drop.
    pub fn try_lock(&self, root: &str, reference: &str) -> Result<RefLockGuard<'_, C>> {
        let entry = self.acquire_entry(root, reference)?;
        Ok(RefLockGuard::new(
            self,
            ScopeKey::new(root, reference),
            entry.since.wall,
        ))
    }

    fn acquire_entry(&self, root: &str, reference: &str) -> Result<LockEntry> {
        let key = ScopeKey::new(root, reference);
        let mut entries = self.entries();

        if let Some(entry) = entries.get(&key) {
            let now = self.clock.now();
            let held_for = entry.held_for(&now);

            if entry.is_stale(&now, self.config.lock_stale_minutes) {
                warn!(
                    root,
                    reference,
                    since = %entry.since.wall,
                    held_ms = held_for.num_milliseconds(),
                    "reference held past stale threshold; probable leaked lock"
                );
            } else {
                debug!(
                    root,
                    reference,
                    held_ms = held_for.num_milliseconds(),
                    "reference busy"
                );
            }

            return Err(RefLockError::Unavailable {
                reference: reference.to_string(),
                now: now.wall,
                since: entry.since.wall,
                held_for,
            });
        }

        let entry = LockEntry::new(self.clock.now());
        entries.insert(key, entry);
        debug!(root, reference, "reference locked");
        Ok(entry)
    }

    /// Unlock `reference` within `root`.
    ///
    /// Releasing a reference that is not held is a no-op. Any caller can
    /// release any key; holders are not tracked.
    pub fn release(&self, root: &str, reference: &str) {
        let removed = self.entries().remove(&ScopeKey::new(root, reference));
        match removed {
            Some(_) => debug!(root, reference, "reference unlocked"),
            None => debug!(root, reference, "release of reference that was not held"),
        }
    }

    /// Whether `reference` within `root` is currently held.
    pub fn is_locked(&self, root: &str, reference: &str) -> bool {
        self.entries().contains_key(&ScopeKey::new(root, reference))
    }

    /// Number of held references across all roots.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether no reference is held.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Snapshot every held reference, sorted by root then reference.
    pub fn held(&self) -> Vec<LockInfo> {
        let now = self.clock.now();
        let mut locks: Vec<LockInfo> = self
            .entries()
            .iter()
            .map(|(key, entry)| LockInfo {
                key: key.clone(),
                since: entry.since.wall,
                held_for: entry.held_for(&now),
                is_stale: entry.is_stale(&now, self.config.lock_stale_minutes),
            })
            .collect();

        // Sort by key for consistent output
        locks.sort_by(|a, b| a.key.cmp(&b.key));

        locks
    }
}
