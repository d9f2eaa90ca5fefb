//! Error types for reflock.
//!
//! Uses thiserror for derive macros. Callers decide retry policy by
//! classifying the error with [`RefLockError::kind`], never by parsing text.

use crate::exit_codes;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// Main error type for reflock operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefLockError {
    /// The reference is currently held by another operation.
    ///
    /// Both healthy contention and a leaked lock surface here; `held_for`
    /// is the only signal telling them apart.
    #[error(
        "ref {reference} locked for {} (since {since}): resource unavailable",
        format_held(.held_for)
    )]
    Unavailable {
        reference: String,
        now: DateTime<Utc>,
        since: DateTime<Utc>,
        held_for: Duration,
    },

    /// Configuration could not be read, parsed, or validated.
    #[error("{0}")]
    Config(String),

    /// A diagnostic self-check observed a broken locking invariant.
    #[error("Check failed: {0}")]
    Check(String),
}

/// Coarse classification of a [`RefLockError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unavailable,
    InvalidConfig,
    CheckFailed,
}

impl RefLockError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RefLockError::Unavailable { .. } => ErrorKind::Unavailable,
            RefLockError::Config(_) => ErrorKind::InvalidConfig,
            RefLockError::Check(_) => ErrorKind::CheckFailed,
        }
    }

    /// Whether the error reports a busy reference.
    pub fn is_unavailable(&self) -> bool {
        self.kind() == ErrorKind::Unavailable
    }

    /// How long the contended reference had been held, if this is a busy error.
    pub fn held_for(&self) -> Option<Duration> {
        match self {
            RefLockError::Unavailable { held_for, .. } => Some(*held_for),
            _ => None,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            RefLockError::Unavailable { .. } => exit_codes::LOCK_UNAVAILABLE,
            RefLockError::Config(_) => exit_codes::USER_ERROR,
            RefLockError::Check(_) => exit_codes::CHECK_FAILURE,
        }
    }
}

/// Renders a hold duration the way `std::time::Duration` debug-prints
/// (`1.5s`, `250µs`), which reads well for both short and long holds.
fn format_held(held_for: &Duration) -> String {
    format!("{:?}", held_for.to_std().unwrap_or_default())
}

/// Result type alias for reflock operations.
pub type Result<T> = std::result::Result<T, RefLockError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn unavailable(held_for: Duration) -> RefLockError {
        let since = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        RefLockError::Unavailable {
            reference: "sha256:abc".to_string(),
            now: since + held_for,
            since,
            held_for,
        }
    }

    #[test]
    fn unavailable_error_is_classified() {
        let err = unavailable(Duration::milliseconds(3));
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert!(err.is_unavailable());
        assert_eq!(err.held_for(), Some(Duration::milliseconds(3)));
        assert_eq!(err.exit_code(), exit_codes::LOCK_UNAVAILABLE);
    }

    #[test]
    fn config_error_has_correct_exit_code() {
        let err = RefLockError::Config("bad yaml".to_string());
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        assert!(!err.is_unavailable());
        assert_eq!(err.held_for(), None);
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn check_error_has_correct_exit_code() {
        let err = RefLockError::Check("two holders".to_string());
        assert_eq!(err.kind(), ErrorKind::CheckFailed);
        assert_eq!(err.exit_code(), exit_codes::CHECK_FAILURE);
    }

    #[test]
    fn unavailable_message_names_ref_duration_and_since() {
        let err = unavailable(Duration::milliseconds(1500));
        assert_eq!(
            err.to_string(),
            "ref sha256:abc locked for 1.5s (since 2024-05-01 12:00:00 UTC): resource unavailable"
        );
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = RefLockError::Check("scenario step 2".to_string());
        assert_eq!(err.to_string(), "Check failed: scenario step 2");
    }
}
