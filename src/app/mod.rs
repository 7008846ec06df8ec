//! User-facing output of the command-line tool.

pub mod report;

// Re-export public API
pub use report::{render_invalid_summary, render_report};
