//! Command implementations for reflock.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod probe;
mod scenario;

use crate::cli::{Cli, Command};
use reflock::config::LockConfig;
use reflock::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => LockConfig::load(path)?,
        None => LockConfig::default(),
    };

    match cli.command {
        Command::Probe(args) => probe::cmd_probe(args, config),
        Command::Scenario => scenario::cmd_scenario(config),
    }
}
