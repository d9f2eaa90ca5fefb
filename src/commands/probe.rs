//! `reflock probe`: race workers for one reference.

use crate::cli::ProbeArgs;
use reflock::config::LockConfig;
use reflock::error::{RefLockError, Result};
use reflock::locks::{Clock, RefLockTable};
use serde::Serialize;
use std::sync::Barrier;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

/// Outcome of one probe run.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub root: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub workers: u32,
    pub acquired: usize,
    pub busy: usize,
    /// Longest hold duration reported to a losing worker.
    pub max_reported_held_ms: i64,
}

pub fn cmd_probe(args: ProbeArgs, config: LockConfig) -> Result<()> {
    let workers = args.workers.unwrap_or(config.probe_workers);
    let hold = Duration::from_millis(args.hold_ms.unwrap_or(config.probe_hold_ms));
    if workers == 0 {
        return Err(RefLockError::Config(
            "--workers must be greater than 0".to_string(),
        ));
    }

    let table = RefLockTable::with_config(config);
    let report = run_probe(&table, &args.root, &args.reference, workers, hold)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| RefLockError::Check(format!("failed to serialize report: {}", e)))?;
        println!("{}", json);
    } else {
        println!("Probed {}/{} with {} workers", report.root, report.reference, report.workers);
        println!("  acquired: {}", report.acquired);
        println!("  busy:     {}", report.busy);
        println!("  longest reported hold: {}ms", report.max_reported_held_ms);
    }

    Ok(())
}

/// Start `workers` threads that each try `root`/`reference` once.
///
/// Winners hold the reference for `hold`. Returns `Check` if two workers
/// were ever inside the critical section together.
pub fn run_probe<C: Clock>(
    table: &RefLockTable<C>,
    root: &str,
    reference: &str,
    workers: u32,
    hold: Duration,
) -> Result<ProbeReport> {
    let barrier = Barrier::new(workers as usize);
    let inside = AtomicUsize::new(0);
    let overlaps = AtomicUsize::new(0);
    let acquired = AtomicUsize::new(0);
    let busy = AtomicUsize::new(0);
    let max_held_ms = AtomicI64::new(0);

    thread::scope(|s| {
        for _ in 0..workers {
            s.spawn(|| {
                barrier.wait();
                match table.try_lock(root, reference) {
                    Ok(guard) => {
                        acquired.fetch_add(1, Ordering::SeqCst);
                        if inside.fetch_add(1, Ordering::SeqCst) != 0 {
                            overlaps.fetch_add(1, Ordering::SeqCst);
                        }
                        thread::sleep(hold);
                        inside.fetch_sub(1, Ordering::SeqCst);
                        drop(guard);
                    }
                    Err(e) => {
                        busy.fetch_add(1, Ordering::SeqCst);
                        if let Some(held_for) = e.held_for() {
                            max_held_ms.fetch_max(held_for.num_milliseconds(), Ordering::SeqCst);
                        }
                    }
                }
            });
        }
    });

    let overlaps = overlaps.into_inner();
    if overlaps > 0 {
        return Err(RefLockError::Check(format!(
            "{} workers held {}/{} concurrently",
            overlaps + 1,
            root,
            reference
        )));
    }

    Ok(ProbeReport {
        root: root.to_string(),
        reference: reference.to_string(),
        workers,
        acquired: acquired.into_inner(),
        busy: busy.into_inner(),
        max_reported_held_ms: max_held_ms.into_inner(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_accounts_for_every_worker() {
        let table = RefLockTable::new();
        let report = run_probe(&table, "store1", "sha256:abc", 6, Duration::from_millis(30)).unwrap();

        assert_eq!(report.workers, 6);
        assert_eq!(report.acquired + report.busy, 6);
        assert!(report.acquired >= 1);
        assert!(table.is_empty());
    }

    #[test]
    fn probe_reports_existing_hold() {
        let table = RefLockTable::new();
        table.try_acquire("store1", "sha256:abc").unwrap();
        thread::sleep(Duration::from_millis(10));

        let report = run_probe(&table, "store1", "sha256:abc", 3, Duration::ZERO).unwrap();

        assert_eq!(report.acquired, 0);
        assert_eq!(report.busy, 3);
        assert!(report.max_reported_held_ms >= 10);
    }

    #[test]
    fn probe_other_root_is_unaffected() {
        let table = RefLockTable::new();
        table.try_acquire("store1", "sha256:abc").unwrap();

        let report = run_probe(&table, "store2", "sha256:abc", 1, Duration::ZERO).unwrap();
        assert_eq!(report.acquired, 1);
    }

    #[test]
    fn probe_report_serializes_ref_field() {
        let table = RefLockTable::new();
        let report = run_probe(&table, "store1", "ingest-1", 1, Duration::ZERO).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["ref"], "ingest-1");
        assert_eq!(json["acquired"], 1);
    }
}
