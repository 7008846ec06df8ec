//! MaxMind database reader.
//!
//! Implements [`CityLookup`] and [`IspLookup`] on top of a local `.mmdb` file.

use std::net::IpAddr;
use std::path::Path;

use log::trace;
use maxminddb::{geoip2, MaxMindDbError, Reader};

use super::lookup::{CityLookup, IspLookup};
use super::types::{CityRecord, IspRecord, LookupError};

/// A MaxMind database opened for lookups.
///
/// The file is read fully into memory when opened and is read-only afterwards,
/// so one reader can back every row of a geofeed.
pub struct MaxMindReader {
    reader: Reader<Vec<u8>>,
}

impl MaxMindReader {
    /// Opens the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns the reader error if the file is missing or is not a valid MMDB.
    pub fn open(path: &Path) -> Result<Self, MaxMindDbError> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self { reader })
    }

    /// Database type from the MMDB metadata (e.g. `GeoIP2-City`).
    pub fn database_type(&self) -> &str {
        &self.reader.metadata.database_type
    }

    /// Short description for logs: type and build epoch.
    pub fn describe(&self) -> String {
        format!(
            "{} (build_{})",
            self.database_type(),
            self.reader.metadata.build_epoch
        )
    }
}

impl CityLookup for MaxMindReader {
    fn lookup_city(&self, addr: IpAddr) -> Result<CityRecord, LookupError> {
        let lookup = self.reader.lookup(addr)?;
        if !lookup.has_data() {
            return Err(LookupError::NotFound(addr));
        }
        let city: geoip2::City = lookup.decode()?.ok_or(LookupError::NotFound(addr))?;

        let record = CityRecord {
            country_iso: city.country.iso_code.unwrap_or_default().to_string(),
            subdivisions: city
                .subdivisions
                .iter()
                .map(|s| s.iso_code.unwrap_or_default().to_string())
                .collect(),
            city_name: city.city.names.english.unwrap_or_default().to_string(),
            postal_code: city.postal.code.unwrap_or_default().to_string(),
        };
        trace!("City lookup for {}: {:?}", addr, record);
        Ok(record)
    }
}

impl IspLookup for MaxMindReader {
    fn lookup_isp(&self, addr: IpAddr) -> Result<IspRecord, LookupError> {
        let lookup = self.reader.lookup(addr)?;
        if !lookup.has_data() {
            return Err(LookupError::NotFound(addr));
        }
        let isp: geoip2::Isp = lookup.decode()?.ok_or(LookupError::NotFound(addr))?;

        let record = IspRecord {
            as_number: isp.autonomous_system_number.unwrap_or(0),
            as_org_name: isp
                .autonomous_system_organization
                .unwrap_or_default()
                .to_string(),
            isp_name: isp.isp.unwrap_or_default().to_string(),
        };
        trace!("ISP lookup for {}: {:?}", addr, record);
        Ok(record)
    }
}
