//! Lock key and snapshot structures.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Composite key identifying one lockable reference.
///
/// `root` isolates one store's references from another's; two keys are
/// equal only when both fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScopeKey {
    /// Namespace the reference belongs to (e.g., a store root directory).
    pub root: String,

    /// The content reference being locked (e.g., `sha256:...`).
    #[serde(rename = "ref")]
    pub reference: String,
}

impl ScopeKey {
    pub fn new(root: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            reference: reference.into(),
        }
    }
}

impl std::fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.root, self.reference)
    }
}

/// Snapshot of a held reference.
#[derive(Debug, Clone, Serialize)]
pub struct LockInfo {
    /// The locked key.
    pub key: ScopeKey,

    /// When the reference was acquired.
    pub since: DateTime<Utc>,

    /// How long it had been held when the snapshot was taken.
    #[serde(serialize_with = "serialize_millis")]
    pub held_for: Duration,

    /// Whether the hold exceeds the configured stale threshold.
    pub is_stale: bool,
}

fn serialize_millis<S: serde::Serializer>(
    held_for: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(held_for.num_milliseconds())
}

impl std::fmt::Display for LockInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (age: {}{})",
            self.key,
            super::metadata::format_age(self.held_for),
            if self.is_stale { ", STALE" } else { "" }
        )
    }
}
