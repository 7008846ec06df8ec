// Shared test helpers: in-memory reference databases and temporary geofeeds.
//
// Fakes are keyed by network; a lookup returns the record of the first network
// that contains the address.

use std::io::Write;
use std::net::IpAddr;

use ipnet::IpNet;
use tempfile::NamedTempFile;

use geofeed_verifier::geoip::{CityLookup, CityRecord, IspLookup, IspRecord, LookupError};

/// City reference data held in memory.
#[derive(Default)]
pub struct FakeCityDb {
    records: Vec<(IpNet, CityRecord)>,
}

impl FakeCityDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record for `network`, e.g. `"2a02:ecc0::/29"`.
    pub fn with(
        mut self,
        network: &str,
        country: &str,
        subdivisions: &[&str],
        city: &str,
        postal: &str,
    ) -> Self {
        let network: IpNet = network.parse().expect("valid test network");
        self.records.push((
            network,
            CityRecord {
                country_iso: country.to_string(),
                subdivisions: subdivisions.iter().map(|s| s.to_string()).collect(),
                city_name: city.to_string(),
                postal_code: postal.to_string(),
            },
        ));
        self
    }
}

impl CityLookup for FakeCityDb {
    fn lookup_city(&self, addr: IpAddr) -> Result<CityRecord, LookupError> {
        self.records
            .iter()
            .find(|(network, _)| network.contains(&addr))
            .map(|(_, record)| record.clone())
            .ok_or(LookupError::NotFound(addr))
    }
}

/// ISP reference data held in memory.
#[derive(Default)]
#[allow(dead_code)] // Not every test file uses the ISP fake
pub struct FakeIspDb {
    records: Vec<(IpNet, IspRecord)>,
}

#[allow(dead_code)]
impl FakeIspDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, network: &str, as_number: u32, as_org: &str, isp: &str) -> Self {
        let network: IpNet = network.parse().expect("valid test network");
        self.records.push((
            network,
            IspRecord {
                as_number,
                as_org_name: as_org.to_string(),
                isp_name: isp.to_string(),
            },
        ));
        self
    }
}

impl IspLookup for FakeIspDb {
    fn lookup_isp(&self, addr: IpAddr) -> Result<IspRecord, LookupError> {
        self.records
            .iter()
            .find(|(network, _)| network.contains(&addr))
            .map(|(_, record)| record.clone())
            .ok_or(LookupError::NotFound(addr))
    }
}

/// Reference data for the three Parsippany-style networks used across tests.
#[allow(dead_code)]
pub fn reference_city_db() -> FakeCityDb {
    FakeCityDb::new()
        .with("2a02:ecc0::/29", "US", &["NJ"], "Parsippany", "34021")
        .with("192.0.2.0/24", "US", &["NJ"], "Parsippany", "07054")
        .with("198.51.100.0/24", "GB", &["ENG", "WBK"], "Reading", "RG1")
}

/// Writes `content` to a temporary geofeed file that lives as long as the handle.
#[allow(dead_code)]
pub fn write_geofeed(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp geofeed");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp geofeed");
    file
}
