//! geofeed_verifier library: RFC 8805 geofeed verification
//!
//! This library checks geofeed files (CSV rows of `prefix,country,region,city,postal`)
//! for well-formedness and compares every row against MaxMind City (and optionally
//! ISP) databases, reporting which rows disagree with the reference data.
//!
//! # Example
//!
//! ```no_run
//! use geofeed_verifier::{process_geofeed, GeofeedError, Options};
//! use std::path::Path;
//!
//! let options = Options {
//!     lax_mode: true,
//!     ..Default::default()
//! };
//!
//! match process_geofeed(
//!     Path::new("geofeed.csv"),
//!     Path::new("/usr/local/share/GeoIP/GeoIP2-City.mmdb"),
//!     None,
//!     options,
//! ) {
//!     Ok(report) => println!(
//!         "Out of {} rows, {} differ",
//!         report.check.total, report.check.differences
//!     ),
//!     Err(GeofeedError::InvalidGeofeed(report)) => {
//!         println!("{} invalid rows", report.check.invalid)
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! Callers holding their own reference data can implement [`geoip::CityLookup`]
//! and [`geoip::IspLookup`] and drive a [`GeofeedProcessor`] directly.

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod error_handling;
pub mod geoip;
pub mod initialization;
pub mod network;
pub mod verify;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, Options};
pub use error_handling::{GeofeedError, RowInvalidity};
pub use network::{normalize_network, NetworkError, NormalizedNetwork};
pub use verify::{
    process_geofeed, AsnHistogram, CheckResult, GeofeedProcessor, GeofeedReport, GeofeedRow,
    RowOutcome, RowVerifier,
};
