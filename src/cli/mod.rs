//! CLI argument parsing for reflock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Reflock: diagnostics for the in-process content reference lock table.
///
/// Exercises a reference lock table the way concurrent ingest sessions do:
/// - Many workers race for the same (root, ref) key
/// - Losers are told the reference is busy and for how long
#[derive(Parser, Debug)]
#[command(name = "reflock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a YAML config file.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for reflock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Race concurrent workers for one reference and report contention.
    ///
    /// Each worker tries the lock once; winners hold it for the configured
    /// time. Fails if two workers ever hold the reference at once.
    Probe(ProbeArgs),

    /// Walk through acquire, contend, release, re-acquire and cross-root locking.
    ///
    /// Fails with exit code 3 if any step behaves unexpectedly.
    Scenario,
}

/// Arguments for the `probe` command.
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Root (store namespace) of the contended key.
    #[arg(long, default_value = "store1")]
    pub root: String,

    /// Reference of the contended key.
    #[arg(long = "ref", default_value = "sha256:abc")]
    pub reference: String,

    /// Number of concurrent workers (overrides config).
    #[arg(long)]
    pub workers: Option<u32>,

    /// Milliseconds each winner holds the reference (overrides config).
    #[arg(long)]
    pub hold_ms: Option<u64>,

    /// Emit the report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_probe_defaults() {
        let cli = Cli::try_parse_from(["reflock", "probe"]).unwrap();
        assert!(cli.config.is_none());
        match cli.command {
            Command::Probe(args) => {
                assert_eq!(args.root, "store1");
                assert_eq!(args.reference, "sha256:abc");
                assert!(args.workers.is_none());
                assert!(args.hold_ms.is_none());
                assert!(!args.json);
            }
            other => panic!("expected probe, got {other:?}"),
        }
    }

    #[test]
    fn parse_probe_overrides() {
        let cli = Cli::try_parse_from([
            "reflock",
            "probe",
            "--root",
            "store2",
            "--ref",
            "ingest-7",
            "--workers",
            "3",
            "--hold-ms",
            "5",
            "--json",
            "--config",
            "reflock.yaml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("reflock.yaml")));
        match cli.command {
            Command::Probe(args) => {
                assert_eq!(args.root, "store2");
                assert_eq!(args.reference, "ingest-7");
                assert_eq!(args.workers, Some(3));
                assert_eq!(args.hold_ms, Some(5));
                assert!(args.json);
            }
            other => panic!("expected probe, got {other:?}"),
        }
    }

    #[test]
    fn parse_scenario() {
        let cli = Cli::try_parse_from(["reflock", "scenario"]).unwrap();
        assert!(matches!(cli.command, Command::Scenario));
    }

    #[test]
    fn reject_unknown_command() {
        assert!(Cli::try_parse_from(["reflock", "unlock"]).is_err());
    }
}
