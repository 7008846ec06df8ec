//! Error handling.
//!
//! This module provides:
//! - File-level errors for geofeed processing (fatal and aggregate)
//! - Initialization errors
//! - The closed set of row invalidity kinds
//!
//! Row-level problems are values, not errors: a rejected row is counted and
//! sampled and processing moves on to the next row.

mod types;

// Re-export public API
pub use types::{GeofeedError, InitializationError, RowInvalidity};
