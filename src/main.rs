//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `geofeed_verifier` library that handles:
//! - Command-line argument parsing (Go-style single-dash flags included)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::warn;
use std::process;

use geofeed_verifier::app::{render_invalid_summary, render_report};
use geofeed_verifier::config::{normalize_flag_args, Opt};
use geofeed_verifier::initialization::init_logger_with;
use geofeed_verifier::{process_geofeed, GeofeedError};

fn main() -> Result<()> {
    let opt = Opt::parse_from(normalize_flag_args(std::env::args_os()));

    let config = match opt.validate() {
        Ok(config) => config,
        Err(e) => Opt::command()
            .error(ErrorKind::MissingRequiredArgument, e.message)
            .exit(),
    };

    init_logger_with(config.log_level.into(), config.log_format)
        .context("Failed to initialize logger")?;

    let result = process_geofeed(
        &config.geofeed,
        &config.city_db,
        config.isp_db.as_deref(),
        config.options,
    );

    match result {
        Ok(report) => {
            print!("{}", render_report(&report));
            Ok(())
        }
        Err(e) => {
            if let GeofeedError::InvalidGeofeed(report) = &e {
                for line in render_invalid_summary(&report.check) {
                    warn!("{}", line);
                }
            }
            // Aggregate failures still print whatever the valid rows produced
            if let Some(report) = e.partial_report().filter(|r| r.check.total > 0) {
                print!("{}", render_report(report));
            }
            let path = if config.options.hide_file_paths_in_errors {
                String::new()
            } else {
                format!(" {}", config.geofeed.display())
            };
            eprintln!(
                "geofeed-verifier error: unable to process geofeed{}: {:#}",
                path, e
            );
            process::exit(1);
        }
    }
}
