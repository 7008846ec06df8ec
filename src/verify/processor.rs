//! Geofeed processing: CSV iteration and file-level outcome.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::info;

use super::invalidity;
use super::result::{Aggregator, GeofeedReport};
use super::row::GeofeedRow;
use super::verifier::RowVerifier;
use crate::config::{Options, COMMENT_MARKER, UTF8_BOM};
use crate::error_handling::GeofeedError;
use crate::geoip::{CityLookup, IspLookup};

/// Strips a leading UTF-8 byte-order mark and checks the rest is UTF-8.
///
/// # Errors
///
/// Returns `GeofeedError::NotUtf8` if the content is not valid UTF-8.
pub fn decode_geofeed(content: &[u8]) -> Result<&str, GeofeedError> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    std::str::from_utf8(content).map_err(|_| GeofeedError::NotUtf8)
}

/// Verifies whole geofeeds, one row at a time.
pub struct GeofeedProcessor<'a> {
    verifier: RowVerifier<'a>,
    options: Options,
}

impl<'a> GeofeedProcessor<'a> {
    /// Creates a processor over the given reference lookups.
    pub fn new(
        city_db: &'a dyn CityLookup,
        isp_db: Option<&'a dyn IspLookup>,
        options: Options,
    ) -> Self {
        Self {
            verifier: RowVerifier::new(city_db, isp_db, options.lax_mode),
            options,
        }
    }

    /// Verifies geofeed content.
    ///
    /// # Errors
    ///
    /// Fatal: `NotUtf8`, `ReadRow`. Aggregate (report attached): `EmptyGeofeed`
    /// when there are no rows and `empty_ok` is off, `InvalidGeofeed` when any
    /// row was rejected.
    pub fn process(&self, content: &[u8]) -> Result<GeofeedReport, GeofeedError> {
        let text = decode_geofeed(content)?;
        self.process_text(text, None)
    }

    /// Verifies already decoded content. `source` only appears in error messages.
    pub(crate) fn process_text(
        &self,
        text: &str,
        source: Option<&Path>,
    ) -> Result<GeofeedReport, GeofeedError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .comment(Some(COMMENT_MARKER))
            .trim(Trim::Fields)
            .from_reader(text.as_bytes());

        let mut aggregator = Aggregator::new();
        let mut record = StringRecord::new();

        loop {
            match reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(source_err) => {
                    return Err(GeofeedError::ReadRow {
                        path: self.displayed_path(source),
                        source: source_err,
                    });
                }
            }

            let fields: Vec<&str> = record.iter().collect();
            let outcome = match GeofeedRow::from_fields(&fields) {
                Some(row) => self.verifier.verify(&row),
                None => invalidity::fewer_fields(&fields),
            };
            aggregator.record_row(outcome);
        }

        let report = aggregator.finish();
        let check = &report.check;
        info!(
            "Processed {} rows: {} differ from the reference data, {} invalid",
            check.total, check.differences, check.invalid
        );

        if check.total == 0 && !self.options.empty_ok {
            return Err(GeofeedError::EmptyGeofeed(Box::new(report)));
        }
        if check.invalid > 0 {
            return Err(GeofeedError::InvalidGeofeed(Box::new(report)));
        }
        Ok(report)
    }

    fn displayed_path(&self, path: Option<&Path>) -> Option<PathBuf> {
        if self.options.hide_file_paths_in_errors {
            None
        } else {
            path.map(Path::to_path_buf)
        }
    }
}
