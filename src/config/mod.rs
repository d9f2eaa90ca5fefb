//! Configuration model for reflock.
//!
//! This module defines the LockConfig struct, optionally loaded from a YAML
//! file. It supports forward-compatible parsing (unknown fields are ignored),
//! sensible defaults for optional fields, and validation of config values.

mod model;
mod operations;


// Re-export public API
pub use model::LockConfig;
