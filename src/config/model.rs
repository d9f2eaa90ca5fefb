//! LockConfig struct definition and default implementation.

use serde::{Deserialize, Serialize};

/// Configuration for a reference lock table and the diagnostic probe.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    // =========================================================================
    // Lock settings
    // =========================================================================
    /// Minutes after which a held reference is reported as stale.
    /// Stale entries are only flagged and logged; they are never expired.
    /// 0 disables staleness reporting.
    #[serde(default = "default_lock_stale_minutes")]
    pub lock_stale_minutes: u32,

    // =========================================================================
    // Probe settings
    // =========================================================================
    /// Number of concurrent workers `reflock probe` starts.
    #[serde(default = "default_probe_workers")]
    pub probe_workers: u32,

    /// How long each successful probe worker holds the reference.
    #[serde(default = "default_probe_hold_ms")]
    pub probe_hold_ms: u64,
}

fn default_lock_stale_minutes() -> u32 {
    120
}

fn default_probe_workers() -> u32 {
    8
}

fn default_probe_hold_ms() -> u64 {
    50
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            lock_stale_minutes: default_lock_stale_minutes(),
            probe_workers: default_probe_workers(),
            probe_hold_ms: default_probe_hold_ms(),
        }
    }
}
