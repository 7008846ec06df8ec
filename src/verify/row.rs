//! Geofeed row representation.

use crate::config::EXPECTED_FIELDS_PER_RECORD;

/// The five meaningful fields of one geofeed line, trimmed.
///
/// Field order follows RFC 8805: network, country, region, city, postal code.
/// Anything past the fifth field is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeofeedRow {
    /// Network prefix or single IP address
    pub network: String,
    /// ISO 3166-1 country code
    pub country_code: String,
    /// ISO 3166-2 region code, with or without the country prefix
    pub region_code: String,
    /// City name
    pub city_name: String,
    /// Postal code (deprecated in RFC 8805, may be empty)
    pub postal_code: String,
}

impl GeofeedRow {
    /// Builds a row from raw CSV fields.
    ///
    /// Returns `None` when there are fewer than five fields.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Option<Self> {
        let fields = fields.get(..EXPECTED_FIELDS_PER_RECORD)?;
        let [network, country, region, city, postal] = fields else {
            return None;
        };

        Some(Self {
            network: network.as_ref().trim().to_string(),
            country_code: country.as_ref().trim().to_string(),
            region_code: region.as_ref().trim().to_string(),
            city_name: city.as_ref().trim().to_string(),
            postal_code: postal.as_ref().trim().to_string(),
        })
    }

    /// The row re-joined as a CSV line, for diagnostics.
    pub fn to_csv_line(&self) -> String {
        [
            self.network.as_str(),
            &self.country_code,
            &self.region_code,
            &self.city_name,
            &self.postal_code,
        ]
        .join(",")
    }
}
