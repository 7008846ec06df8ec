//! GeoIP data structures.
//!
//! Snapshots of the reference data used to check one geofeed row.

use std::net::IpAddr;

use thiserror::Error;

/// City database record for one address.
///
/// Missing values in the database are represented as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityRecord {
    /// ISO 3166-1 country code
    pub country_iso: String,
    /// Subdivision ISO codes, least specific first
    pub subdivisions: Vec<String>,
    /// English city name
    pub city_name: String,
    /// Postal code
    pub postal_code: String,
}

impl CityRecord {
    /// Finest-grained subdivision code, or `""` when the record has none.
    pub fn most_specific_subdivision(&self) -> &str {
        self.subdivisions.last().map(String::as_str).unwrap_or("")
    }
}

/// ISP database record for one address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IspRecord {
    /// Autonomous system number, `0` when unknown
    pub as_number: u32,
    /// Autonomous system organization
    pub as_org_name: String,
    /// ISP name
    pub isp_name: String,
}

/// Reasons a lookup produced no record.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The database has no data for the address.
    #[error("no record found for {0}")]
    NotFound(IpAddr),

    /// The database could not be searched or the record could not be decoded.
    #[error(transparent)]
    Database(#[from] maxminddb::MaxMindDbError),
}
