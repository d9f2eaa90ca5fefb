//! Exit code constants for the reflock CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 3: Diagnostic check failure
//! - 4: Reference lock unavailable

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// A diagnostic command observed a broken locking invariant.
pub const CHECK_FAILURE: i32 = 3;

/// A reference lock was held by another operation.
pub const LOCK_UNAVAILABLE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, CHECK_FAILURE, LOCK_UNAVAILABLE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }
}
