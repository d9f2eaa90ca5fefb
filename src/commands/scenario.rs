//! `reflock scenario`: step through the basic locking guarantees.

use reflock::config::LockConfig;
use reflock::error::{RefLockError, Result};
use reflock::locks::{Clock, RefLockTable};

const REF: &str = "sha256:abc";

pub fn cmd_scenario(config: LockConfig) -> Result<()> {
    let table = RefLockTable::with_config(config);
    for line in run_scenario(&table)? {
        println!("{}", line);
    }
    Ok(())
}

/// Longest hold a contender may see right after acquisition.
const IMMEDIATE_HOLD_LIMIT_MS: i64 = 1000;

fn check(ok: bool, step: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(RefLockError::Check(step.to_string()))
    }
}

fn acquire<C: Clock>(table: &RefLockTable<C>, root: &str, step: &str) -> Result<()> {
    table
        .try_acquire(root, REF)
        .map_err(|e| RefLockError::Check(format!("{}: {}", step, e)))
}

/// Run the scenario against `table`, returning one line per step.
pub fn run_scenario<C: Clock>(table: &RefLockTable<C>) -> Result<Vec<String>> {
    let mut steps = Vec::new();

    acquire(table, "store1", "first acquire of store1 failed")?;
    steps.push(format!("acquire store1/{}: ok", REF));

    match table.try_acquire("store1", REF) {
        Ok(()) => {
            return Err(RefLockError::Check(format!(
                "second acquire of store1/{} succeeded",
                REF
            )));
        }
        Err(e) => {
            let held_ms = e.held_for().map(|held| held.num_milliseconds());
            check(
                matches!(held_ms, Some(ms) if ms < IMMEDIATE_HOLD_LIMIT_MS),
                &format!("immediate re-acquire reported {}", e),
            )?;
            steps.push(format!("re-acquire store1/{}: {}", REF, e));
        }
    }

    table.release("store1", REF);
    check(
        !table.is_locked("store1", REF),
        "store1 reference still held after release",
    )?;
    steps.push(format!("release store1/{}: ok", REF));

    acquire(table, "store1", "acquire of store1 after release failed")?;
    steps.push(format!("re-acquire store1/{} after release: ok", REF));

    acquire(table, "store2", "acquire of store2 blocked by store1")?;
    steps.push(format!("acquire store2/{} while store1 held: ok", REF));

    for info in table.held() {
        steps.push(format!("held: {}", info));
    }

    table.release("store1", REF);
    table.release("store2", REF);
    check(table.is_empty(), "table not empty after final release")?;

    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use reflock::error::ErrorKind;
    use reflock::exit_codes;
    use reflock::locks::{ManualClock, Timestamp};

    #[test]
    fn scenario_passes_on_fresh_table() {
        let table = RefLockTable::new();
        let steps = run_scenario(&table).unwrap();

        assert!(steps[1].contains("resource unavailable"));
        assert!(steps.iter().any(|s| s.starts_with("held: store2/sha256:abc")));
        assert!(table.is_empty());
    }

    #[test]
    fn scenario_fails_check_when_reference_already_held() {
        let table = RefLockTable::new();
        table.try_acquire("store1", REF).unwrap();

        let err = run_scenario(&table).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CheckFailed);
        assert_eq!(err.exit_code(), exit_codes::CHECK_FAILURE);
        assert!(err.to_string().contains("first acquire of store1 failed"));
    }

    #[test]
    fn scenario_fails_check_when_other_root_held() {
        let table = RefLockTable::new();
        table.try_acquire("store2", REF).unwrap();

        let err = run_scenario(&table).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CheckFailed);
        assert!(err.to_string().contains("store2"));
    }

    /// Lets ten seconds pass every time it is read.
    struct SlowClock(ManualClock);

    impl Clock for SlowClock {
        fn now(&self) -> Timestamp {
            self.0.advance(Duration::seconds(10));
            self.0.now()
        }
    }

    #[test]
    fn scenario_fails_check_on_long_immediate_hold() {
        let clock = SlowClock(ManualClock::new(Utc::now()));
        let table = RefLockTable::with_clock(LockConfig::default(), clock);

        let err = run_scenario(&table).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CheckFailed);
        assert!(err.to_string().contains("immediate re-acquire reported"));
    }
}
