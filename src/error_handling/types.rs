//! Error type definitions.
//!
//! This module defines the file-level errors returned by geofeed processing and
//! the closed set of row-level invalidity kinds.

use std::io;
use std::path::{Path, PathBuf};

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::verify::GeofeedReport;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors returned while processing a geofeed.
///
/// There are two families:
/// - **Fatal** (`OpenGeofeed`, `OpenDatabase`, `NotUtf8`, `ReadRow`): processing
///   stopped and no partial result exists.
/// - **Aggregate** (`EmptyGeofeed`, `InvalidGeofeed`): every row was processed and
///   the full report is attached, so callers can print diagnostics alongside the
///   partial output. See [`GeofeedError::partial_report`].
#[derive(Error, Debug)]
pub enum GeofeedError {
    /// The geofeed file could not be read.
    #[error("unable to open geofeed{}: {source}", path_suffix(.path))]
    OpenGeofeed {
        /// Path of the geofeed, `None` when paths are hidden
        path: Option<PathBuf>,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A reference database could not be opened.
    #[error("unable to open {kind}{}: {source}", path_suffix(.path))]
    OpenDatabase {
        /// Which database failed (`MMDB` or `ISP MMDB`)
        kind: &'static str,
        /// Path of the database, `None` when paths are hidden
        path: Option<PathBuf>,
        /// Underlying reader error
        source: maxminddb::MaxMindDbError,
    },

    /// The geofeed content is not valid UTF-8.
    #[error("geofeed is not valid UTF-8")]
    NotUtf8,

    /// The CSV reader hit a structural error.
    #[error("unable to read next row{}: {source}", path_in(.path))]
    ReadRow {
        /// Path of the geofeed, `None` when paths are hidden or unknown
        path: Option<PathBuf>,
        /// Underlying CSV error
        source: csv::Error,
    },

    /// The geofeed has no rows and empty geofeeds are not allowed.
    #[error("geofeed is empty")]
    EmptyGeofeed(Box<GeofeedReport>),

    /// At least one row failed validation.
    #[error("geofeed does not comply with the RFC 8805 standards")]
    InvalidGeofeed(Box<GeofeedReport>),
}

impl GeofeedError {
    /// Returns the report produced before an aggregate failure.
    ///
    /// Fatal errors return `None`: nothing meaningful was accumulated.
    pub fn partial_report(&self) -> Option<&GeofeedReport> {
        match self {
            GeofeedError::EmptyGeofeed(report) | GeofeedError::InvalidGeofeed(report) => {
                Some(report)
            }
            _ => None,
        }
    }

    /// Converts the error into its partial report, if it carries one.
    pub fn into_partial_report(self) -> Option<GeofeedReport> {
        match self {
            GeofeedError::EmptyGeofeed(report) | GeofeedError::InvalidGeofeed(report) => {
                Some(*report)
            }
            _ => None,
        }
    }
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_deref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

fn path_in(path: &Option<PathBuf>) -> String {
    path.as_deref()
        .map(|p: &Path| format!(" in {}", p.display()))
        .unwrap_or_default()
}

/// Reason a geofeed row was rejected.
///
/// Exactly one kind is reported per row: checks run in a fixed order and the first
/// failure wins. The ordering derive keeps sample output stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIterMacro)]
pub enum RowInvalidity {
    /// The row has fewer than five fields.
    FewerFieldsThanExpected,
    /// The network field is empty after trimming.
    EmptyNetwork,
    /// The network field is not a valid IP address or CIDR prefix.
    UnableToParseNetwork,
    /// The City database has no usable record for the address.
    UnableToFindCityRecord,
    /// The ISP database has no usable record for the address.
    UnableToFindISPRecord,
    /// A bare region code was given in strict mode.
    InvalidRegionCode,
}

impl std::fmt::Display for RowInvalidity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RowInvalidity {
    /// Stable name of the kind, as printed in invalid-row summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            RowInvalidity::FewerFieldsThanExpected => "FewerFieldsThanExpected",
            RowInvalidity::EmptyNetwork => "EmptyNetwork",
            RowInvalidity::UnableToParseNetwork => "UnableToParseNetwork",
            RowInvalidity::UnableToFindCityRecord => "UnableToFindCityRecord",
            RowInvalidity::UnableToFindISPRecord => "UnableToFindISPRecord",
            RowInvalidity::InvalidRegionCode => "InvalidRegionCode",
        }
    }
}
