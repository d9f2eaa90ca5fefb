//! Reference lock table for reflock.
//!
//! This module serializes concurrent operations against the same content
//! reference (a blob digest, an ingest session name) inside one process:
//! - Keys are scoped by a root, so several stores can share a process
//!   without seeing each other's locks
//! - Acquisition is a **try-lock**: a contending caller is told immediately
//!   that the reference is busy and for how long, it never waits
//! - Release is idempotent and ownership-agnostic
//!
//! # Hold Durations
//!
//! A busy error carries the time the reference has been held. Millisecond
//! durations mean ordinary contention between live operations; hours mean a
//! caller forgot to release. Durations are measured on the monotonic clock,
//! so a wall-clock step cannot hide a leaked lock. Entries older than
//! `lock_stale_minutes` are flagged as stale in snapshots and logged, but
//! never expired.
//!
//! # RAII Guards
//!
//! [`RefLockTable::try_lock`] returns a guard that releases the reference
//! when dropped, so release fires on every exit path including unwinding.

mod clock;
mod guard;
mod metadata;
mod table;
mod types;


// Re-export public API
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use guard::RefLockGuard;
pub use metadata::LockEntry;
pub use table::RefLockTable;
pub use types::{LockInfo, ScopeKey};
