//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (default database path, row shape, prefix rules)
//! - Library options for geofeed verification
//! - CLI option types, Go-style flag normalization and validation

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    normalize_flag_args, Config, ConfigValidationError, LogFormat, LogLevel, Opt, Options,
};
