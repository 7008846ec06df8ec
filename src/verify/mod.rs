//! Geofeed verification engine.
//!
//! This module provides:
//! - [`GeofeedRow`]: the five meaningful fields of a geofeed line
//! - [`RowVerifier`]: normalizes, looks up and compares a single row
//! - [`Aggregator`]: folds row outcomes into counts, samples and the ASN histogram
//! - [`GeofeedProcessor`]: drives CSV parsing and decides the file-level outcome
//! - [`process_geofeed`]: opens the geofeed and databases from disk and runs the above

mod invalidity;
mod processor;
mod result;
mod row;
mod verifier;

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::Options;
use crate::error_handling::GeofeedError;
use crate::geoip::{IspLookup, MaxMindReader};

// Re-export public API
pub use processor::{decode_geofeed, GeofeedProcessor};
pub use result::{Aggregator, AsnHistogram, CheckResult, GeofeedReport, RowOutcome};
pub use row::GeofeedRow;
pub use verifier::RowVerifier;

/// Verifies the geofeed at `geofeed` against the City database at `city_db`
/// and, when given, the ISP database at `isp_db`.
///
/// The geofeed is read and checked for UTF-8 before any database is opened.
///
/// # Errors
///
/// Fatal errors (`OpenGeofeed`, `NotUtf8`, `OpenDatabase`, `ReadRow`) stop
/// processing. `EmptyGeofeed` and `InvalidGeofeed` are returned after every row
/// was processed and carry the full report.
///
/// # Example
///
/// ```no_run
/// use geofeed_verifier::{process_geofeed, Options};
/// use std::path::Path;
///
/// let report = process_geofeed(
///     Path::new("geofeed.csv"),
///     Path::new("/usr/local/share/GeoIP/GeoIP2-City.mmdb"),
///     None,
///     Options::default(),
/// )?;
/// println!("{} of {} rows differ", report.check.differences, report.check.total);
/// # Ok::<(), geofeed_verifier::GeofeedError>(())
/// ```
pub fn process_geofeed(
    geofeed: &Path,
    city_db: &Path,
    isp_db: Option<&Path>,
    options: Options,
) -> Result<GeofeedReport, GeofeedError> {
    let shown = |path: &Path| -> Option<PathBuf> {
        (!options.hide_file_paths_in_errors).then(|| path.to_path_buf())
    };

    let content = fs::read(geofeed).map_err(|source| GeofeedError::OpenGeofeed {
        path: shown(geofeed),
        source,
    })?;
    let text = decode_geofeed(&content)?;

    let city_reader = MaxMindReader::open(city_db).map_err(|source| GeofeedError::OpenDatabase {
        kind: "MMDB",
        path: shown(city_db),
        source,
    })?;
    info!("Opened reference database: {}", city_reader.describe());

    let isp_reader = match isp_db {
        Some(path) => {
            let reader = MaxMindReader::open(path).map_err(|source| GeofeedError::OpenDatabase {
                kind: "ISP MMDB",
                path: shown(path),
                source,
            })?;
            info!("Opened ISP database: {}", reader.describe());
            Some(reader)
        }
        None => None,
    };

    let processor = GeofeedProcessor::new(
        &city_reader,
        isp_reader.as_ref().map(|reader| reader as &dyn IspLookup),
        options,
    );
    processor.process_text(text, Some(geofeed))
}
