//! RAII reference lock guard.

use super::clock::Clock;
use super::table::RefLockTable;
use super::types::ScopeKey;
use chrono::{DateTime, Utc};

/// RAII guard for a held reference.
///
/// When dropped, the reference is released back to its table.
#[derive(Debug)]
pub struct RefLockGuard<'a, C: Clock> {
    table: &'a RefLockTable<C>,

    key: ScopeKey,

    since: DateTime<Utc>,

    /// Whether the lock has been released manually.
    released: bool,
}

impl<'a, C: Clock> RefLockGuard<'a, C> {
    pub(super) fn new(table: &'a RefLockTable<C>, key: ScopeKey, since: DateTime<Utc>) -> Self {
        Self {
            table,
            key,
            since,
            released: false,
        }
    }

    /// The key this guard holds.
    pub fn key(&self) -> &ScopeKey {
        &self.key
    }

    /// When the reference was acquired.
    pub fn since(&self) -> DateTime<Utc> {
        self.since
    }

    /// Release the reference before the guard goes out of scope.
    pub fn release(mut self) {
        self.unlock();
    }

    fn unlock(&mut self) {
        if !self.released {
            self.released = true;
            self.table.release(&self.key.root, &self.key.reference);
        }
    }
}

impl<C: Clock> Drop for RefLockGuard<'_, C> {
    fn drop(&mut self) {
        self.unlock();
    }
}
