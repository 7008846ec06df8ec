//! Configuration types and CLI options.
//!
//! This module defines the library `Options` record, the command-line surface
//! (`Opt`), and the validated `Config` the binary runs with.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use thiserror::Error;

use crate::config::constants::DEFAULT_CITY_DB_PATH;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Options controlling how a geofeed is verified.
///
/// This is the library configuration record; it has no CLI dependencies and
/// defaults to strict mode with non-empty geofeeds required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Accept region codes without the ISO 3166-1 country prefix (`NJ` as well as `US-NJ`).
    pub lax_mode: bool,
    /// Keep file system paths out of error messages, for contexts where the
    /// error text may be shown to third parties.
    pub hide_file_paths_in_errors: bool,
    /// Treat a geofeed with no rows as valid.
    pub empty_ok: bool,
}

/// Command-line options.
///
/// Flags follow the historical single-dash spelling (`-gf`, `-db`, `-lax=true`).
/// Run the raw arguments through [`normalize_flag_args`] before parsing so both
/// `-gf` and `--gf` are accepted.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "geofeed-verifier",
    version,
    about = "Verify an RFC 8805 geofeed and compare its corrections against a MaxMind database"
)]
pub struct Opt {
    /// Path to local geofeed file to verify
    #[arg(long = "gf", value_name = "PATH")]
    pub gf: Option<String>,

    /// Path to MMDB file to compare geofeed file against
    #[arg(long = "db", value_name = "PATH", default_value = DEFAULT_CITY_DB_PATH)]
    pub db: String,

    /// Path to ISP MMDB file (optional)
    #[arg(long = "isp", value_name = "PATH")]
    pub isp: Option<String>,

    /// Enable lax mode: geofeed's region code may be provided without country code prefix
    #[arg(
        long = "lax",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub lax: bool,

    /// Allow empty geofeeds to be considered valid
    #[arg(
        long = "empty-ok",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub empty_ok: bool,

    /// Leave file paths out of error messages
    #[arg(
        long = "hide-file-paths",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub hide_file_paths: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// A validated run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Geofeed file to verify
    pub geofeed: PathBuf,
    /// Reference City database
    pub city_db: PathBuf,
    /// Optional ISP database used for AS number reporting
    pub isp_db: Option<PathBuf>,
    /// Verification options
    pub options: Options,
    /// Log level
    pub log_level: LogLevel,
    /// Log format
    pub log_format: LogFormat,
}

/// Error returned when the command-line options are incomplete.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ConfigValidationError {
    /// Flag that failed validation
    pub field: &'static str,
    /// Human-readable explanation
    pub message: String,
}

impl Opt {
    /// Checks required flags and converts the options into a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns a `ConfigValidationError` when `-gf` is missing or `-db` is empty.
    pub fn validate(self) -> Result<Config, ConfigValidationError> {
        let geofeed = self.gf.filter(|gf| !gf.is_empty());

        let Some(geofeed) = geofeed else {
            let message = if self.db.is_empty() {
                "-gf is required and -db can not be an empty string"
            } else {
                "-gf is required"
            };
            return Err(ConfigValidationError {
                field: "gf",
                message: message.to_string(),
            });
        };
        if self.db.is_empty() {
            return Err(ConfigValidationError {
                field: "db",
                message: "-db is required".to_string(),
            });
        }

        Ok(Config {
            geofeed: PathBuf::from(geofeed),
            city_db: PathBuf::from(self.db),
            isp_db: self.isp.filter(|isp| !isp.is_empty()).map(PathBuf::from),
            options: Options {
                lax_mode: self.lax,
                hide_file_paths_in_errors: self.hide_file_paths,
                empty_ok: self.empty_ok,
            },
            log_level: self.log_level,
            log_format: self.log_format,
        })
    }
}

/// Rewrites single-dash long flags (`-gf`, `-lax=true`, `-help`) into the
/// double-dash form clap expects.
///
/// The program name, single-character flags (`-h`, `-V`), values, and every
/// argument after a bare `--` pass through unchanged.
pub fn normalize_flag_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;

    for (index, arg) in args.into_iter().map(Into::into).enumerate() {
        if index == 0 || passthrough {
            normalized.push(arg);
            continue;
        }
        match arg.to_str() {
            Some("--") => {
                passthrough = true;
                normalized.push(arg);
            }
            Some(flag) if is_single_dash_long_flag(flag) => {
                normalized.push(OsString::from(format!("-{flag}")));
            }
            _ => normalized.push(arg),
        }
    }

    normalized
}

fn is_single_dash_long_flag(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let name = rest.split('=').next().unwrap_or_default();
    name.len() > 1 && name.starts_with(|c: char| c.is_ascii_alphabetic())
}
