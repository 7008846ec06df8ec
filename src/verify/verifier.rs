//! Row verification against the reference databases.
//!
//! Each row goes through the same fixed sequence of checks and the first failure
//! decides its invalidity kind:
//!
//! 1. the network field must normalize to a prefix,
//! 2. the City database must have a record for the prefix address,
//! 3. in strict mode the region code must carry its country prefix,
//! 4. the ISP database (when configured) must have a record for the address.
//!
//! Rows that pass are compared field by field, case-insensitively. The postal
//! code is only compared when the row supplies one.

use log::trace;

use super::invalidity;
use super::result::RowOutcome;
use super::row::GeofeedRow;
use crate::config::DIFF_INDENT;
use crate::geoip::{CityLookup, CityRecord, IspLookup, IspRecord};
use crate::network::normalize_network;

/// Checks geofeed rows against a City database and an optional ISP database.
pub struct RowVerifier<'a> {
    city_db: &'a dyn CityLookup,
    isp_db: Option<&'a dyn IspLookup>,
    lax_mode: bool,
}

impl<'a> RowVerifier<'a> {
    /// Creates a verifier. `lax_mode` accepts region codes without a country prefix.
    pub fn new(
        city_db: &'a dyn CityLookup,
        isp_db: Option<&'a dyn IspLookup>,
        lax_mode: bool,
    ) -> Self {
        Self {
            city_db,
            isp_db,
            lax_mode,
        }
    }

    /// Verifies one row.
    pub fn verify(&self, row: &GeofeedRow) -> RowOutcome {
        let network = match normalize_network(&row.network) {
            Ok(network) => network,
            Err(err) => return invalidity::bad_network(row, &err),
        };

        let city = match self.city_db.lookup_city(network.addr()) {
            Ok(city) => city,
            Err(err) => return invalidity::missing_city_record(network, &err),
        };

        let Some(region) = self.comparable_region(&row.region_code, &city) else {
            return invalidity::invalid_region_code(row);
        };

        let isp = match self.isp_db {
            Some(isp_db) => match isp_db.lookup_isp(network.addr()) {
                Ok(isp) => Some(isp),
                Err(err) => return invalidity::missing_isp_record(network, &err),
            },
            None => None,
        };

        let mismatches = field_mismatches(row, &city, &region);
        if mismatches.is_empty() {
            trace!("{} matches the reference record", network);
            return RowOutcome::matching();
        }

        let mut lines = vec![format!("\nFound a potential improvement: '{network}'")];
        lines.extend(mismatches);

        let as_number = isp.as_ref().map(|isp| isp.as_number).filter(|&n| n > 0);
        if let Some(isp) = &isp {
            lines.extend(network_operator_lines(isp));
        }

        let separator = format!("\n{DIFF_INDENT}");
        RowOutcome::Valid {
            diff_text: lines.join(separator.as_str()),
            as_number,
        }
    }

    /// Reference region in the form the row uses.
    ///
    /// A row region containing `-` is compared as `<country>-<subdivision>`. A bare
    /// region is compared to the subdivision alone, which is only allowed in lax
    /// mode; `None` means the row is rejected.
    fn comparable_region(&self, row_region: &str, city: &CityRecord) -> Option<String> {
        let subdivision = city.most_specific_subdivision();
        if row_region.contains('-') {
            Some(format!("{}-{}", city.country_iso, subdivision))
        } else if !row_region.is_empty() && !self.lax_mode {
            None
        } else {
            Some(subdivision.to_string())
        }
    }
}

/// One line per differing field, in the order country, region, city, postal code.
fn field_mismatches(row: &GeofeedRow, city: &CityRecord, region: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut compare = |field: &str, current: &str, suggested: &str| {
        if !equal_fold(current, suggested) {
            lines.push(format!(
                "current {field}: '{current}'{DIFF_INDENT}suggested {field}: '{suggested}'"
            ));
        }
    };

    compare("country", &city.country_iso, &row.country_code);
    compare("region", region, &row.region_code);
    compare("city", &city.city_name, &row.city_name);
    // An empty postal code means the submitter has no opinion.
    if !row.postal_code.is_empty() {
        compare("postal code", &city.postal_code, &row.postal_code);
    }

    lines
}

fn network_operator_lines(isp: &IspRecord) -> Vec<String> {
    let mut lines = Vec::new();
    if isp.as_number > 0 {
        lines.push(format!("AS Number: {}", isp.as_number));
    }
    if !isp.as_org_name.is_empty() {
        lines.push(format!("AS Name: {}", isp.as_org_name));
    }
    if !isp.isp_name.is_empty() {
        lines.push(format!("ISP Name: {}", isp.isp_name));
    }
    lines
}

/// Unicode case-insensitive equality.
fn equal_fold(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::RowInvalidity;
    use crate::geoip::LookupError;
    use proptest::prelude::*;
    use std::net::IpAddr;

    struct StaticCity(Option<CityRecord>);

    impl CityLookup for StaticCity {
        fn lookup_city(&self, addr: IpAddr) -> Result<CityRecord, LookupError> {
            self.0.clone().ok_or(LookupError::NotFound(addr))
        }
    }

    struct StaticIsp(Option<IspRecord>);

    impl IspLookup for StaticIsp {
        fn lookup_isp(&self, addr: IpAddr) -> Result<IspRecord, LookupError> {
            self.0.clone().ok_or(LookupError::NotFound(addr))
        }
    }

    fn parsippany() -> StaticCity {
        StaticCity(Some(CityRecord {
            country_iso: "US".to_string(),
            subdivisions: vec!["NJ".to_string()],
            city_name: "Parsippany".to_string(),
            postal_code: "07054".to_string(),
        }))
    }

    fn row(fields: [&str; 5]) -> GeofeedRow {
        GeofeedRow::from_fields(&fields).expect("five fields")
    }

    fn kind(outcome: &RowOutcome) -> Option<RowInvalidity> {
        match outcome {
            RowOutcome::Invalid { kind, .. } => Some(*kind),
            RowOutcome::Valid { .. } => None,
        }
    }

    fn diff(outcome: RowOutcome) -> (String, Option<u32>) {
        match outcome {
            RowOutcome::Valid {
                diff_text,
                as_number,
            } => (diff_text, as_number),
            RowOutcome::Invalid { kind, message } => panic!("unexpected {kind}: {message}"),
        }
    }

    #[test]
    fn test_exact_match_has_no_diff() {
        let city = parsippany();
        let verifier = RowVerifier::new(&city, None, false);
        let outcome = verifier.verify(&row(["192.0.2.0/24", "us", "us-nj", "PARSIPPANY", "07054"]));
        assert_eq!(outcome, RowOutcome::matching());
    }

    #[test]
    fn test_empty_network() {
        let city = parsippany();
        let verifier = RowVerifier::new(&city, None, false);
        let outcome = verifier.verify(&row(["  ", "US", "US-NJ", "Parsippany", ""]));
        assert_eq!(kind(&outcome), Some(RowInvalidity::EmptyNetwork));
    }

    #[test]
    fn test_unparseable_network() {
        let city = parsippany();
        let verifier = RowVerifier::new(&city, None, false);
        let outcome = verifier.verify(&row(["2a02:/29", "US", "US-NJ", "Parsippany", ""]));
        assert_eq!(kind(&outcome), Some(RowInvalidity::UnableToParseNetwork));
    }

    #[test]
    fn test_missing_city_record() {
        let city = StaticCity(None);
        let verifier = RowVerifier::new(&city, None, false);
        let outcome = verifier.verify(&row(["192.0.2.1", "US", "US-NJ", "Parsippany", ""]));
        assert_eq!(kind(&outcome), Some(RowInvalidity::UnableToFindCityRecord));
    }

    #[test]
    fn test_bare_region_rejected_in_strict_mode() {
        let city = parsippany();
        let verifier = RowVerifier::new(&city, None, false);
        let outcome = verifier.verify(&row(["192.0.2.0/24", "US", "NJ", "Parsippany", ""]));
        assert_eq!(kind(&outcome), Some(RowInvalidity::InvalidRegionCode));
    }

    #[test]
    fn test_bare_region_accepted_in_lax_mode() {
        let city = parsippany();
        let verifier = RowVerifier::new(&city, None, true);
        let outcome = verifier.verify(&row(["192.0.2.0/24", "US", "nj", "Parsippany", ""]));
        assert_eq!(outcome, RowOutcome::matching());

        let outcome = verifier.verify(&row(["192.0.2.0/24", "US", "NY", "Parsippany", ""]));
        let (text, _) = diff(outcome);
        assert!(text.contains("current region: 'NJ'\t\tsuggested region: 'NY'"));
    }

    #[test]
    fn test_empty_region_is_compared_in_strict_mode() {
        let city = parsippany();
        let verifier = RowVerifier::new(&city, None, false);
        let (text, _) = diff(verifier.verify(&row(["192.0.2.0/24", "US", "", "Parsippany", ""])));
        assert!(text.contains("current region: 'NJ'\t\tsuggested region: ''"));
    }

    #[test]
    fn test_region_check_precedes_isp_lookup() {
        let city = parsippany();
        let isp = StaticIsp(None);
        let verifier = RowVerifier::new(&city, Some(&isp), false);
        let outcome = verifier.verify(&row(["192.0.2.0/24", "US", "NJ", "Parsippany", ""]));
        assert_eq!(kind(&outcome), Some(RowInvalidity::InvalidRegionCode));
    }

    #[test]
    fn test_missing_isp_record_invalidates_matching_row() {
        let city = parsippany();
        let isp = StaticIsp(None);
        let verifier = RowVerifier::new(&city, Some(&isp), false);
        let outcome = verifier.verify(&row(["192.0.2.0/24", "US", "US-NJ", "Parsippany", ""]));
        assert_eq!(kind(&outcome), Some(RowInvalidity::UnableToFindISPRecord));
    }

    #[test]
    fn test_postal_code_skipped_when_empty() {
        let city = parsippany();
        let verifier = RowVerifier::new(&city, None, false);
        let outcome = verifier.verify(&row(["192.0.2.0/24", "US", "US-NJ", "Parsippany", ""]));
        assert_eq!(outcome, RowOutcome::matching());
    }

    #[test]
    fn test_postal_code_difference() {
        let city = parsippany();
        let verifier = RowVerifier::new(&city, None, false);
        let (text, as_number) =
            diff(verifier.verify(&row(["192.0.2.0/24", "US", "US-NJ", "Parsippany", "34021"])));
        assert_eq!(
            text,
            "\nFound a potential improvement: '192.0.2.0/24'\n\t\t\
             current postal code: '07054'\t\tsuggested postal code: '34021'"
        );
        assert_eq!(as_number, None);
    }

    #[test]
    fn test_diff_field_order() {
        let city = parsippany();
        let verifier = RowVerifier::new(&city, None, false);
        let (text, _) = diff(verifier.verify(&row(["192.0.2.1", "CA", "CA-ON", "Toronto", "M5V"])));
        let lines: Vec<&str> = text.split("\n\t\t").collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "\nFound a potential improvement: '192.0.2.1/32'");
        assert_eq!(lines[1], "current country: 'US'\t\tsuggested country: 'CA'");
        assert_eq!(lines[2], "current region: 'US-NJ'\t\tsuggested region: 'CA-ON'");
        assert_eq!(lines[3], "current city: 'Parsippany'\t\tsuggested city: 'Toronto'");
        assert_eq!(
            lines[4],
            "current postal code: '07054'\t\tsuggested postal code: 'M5V'"
        );
    }

    #[test]
    fn test_asn_lines_for_differing_row() {
        let city = parsippany();
        let isp = StaticIsp(Some(IspRecord {
            as_number: 64500,
            as_org_name: "Example Networks".to_string(),
            isp_name: "Example ISP".to_string(),
        }));
        let verifier = RowVerifier::new(&city, Some(&isp), false);
        let (text, as_number) =
            diff(verifier.verify(&row(["192.0.2.0/24", "US", "US-NJ", "Newark", ""])));
        assert!(text.ends_with(
            "AS Number: 64500\n\t\tAS Name: Example Networks\n\t\tISP Name: Example ISP"
        ));
        assert_eq!(as_number, Some(64500));
    }

    #[test]
    fn test_matching_row_with_isp_has_no_asn() {
        let city = parsippany();
        let isp = StaticIsp(Some(IspRecord {
            as_number: 64500,
            ..Default::default()
        }));
        let verifier = RowVerifier::new(&city, Some(&isp), false);
        let outcome = verifier.verify(&row(["192.0.2.0/24", "US", "US-NJ", "Parsippany", ""]));
        assert_eq!(outcome, RowOutcome::matching());
    }

    #[test]
    fn test_zero_asn_is_not_reported() {
        let city = parsippany();
        let isp = StaticIsp(Some(IspRecord {
            as_number: 0,
            as_org_name: String::new(),
            isp_name: "Example ISP".to_string(),
        }));
        let verifier = RowVerifier::new(&city, Some(&isp), false);
        let (text, as_number) =
            diff(verifier.verify(&row(["192.0.2.0/24", "US", "US-NJ", "Newark", ""])));
        assert!(!text.contains("AS Number"));
        assert!(text.ends_with("ISP Name: Example ISP"));
        assert_eq!(as_number, None);
    }

    #[test]
    fn test_reference_without_subdivision() {
        let city = StaticCity(Some(CityRecord {
            country_iso: "SG".to_string(),
            city_name: "Singapore".to_string(),
            ..Default::default()
        }));
        let verifier = RowVerifier::new(&city, None, false);
        assert_eq!(
            verifier.verify(&row(["192.0.2.0/24", "SG", "", "Singapore", ""])),
            RowOutcome::matching()
        );
        let (text, _) = diff(verifier.verify(&row(["192.0.2.0/24", "SG", "SG-01", "Singapore", ""])));
        assert!(text.contains("current region: 'SG-'\t\tsuggested region: 'SG-01'"));
    }

    #[test]
    fn test_equal_fold_unicode() {
        assert!(equal_fold("MÜNCHEN", "münchen"));
        assert!(!equal_fold("Munich", "München"));
    }

    proptest! {
        #[test]
        fn test_strict_mode_rejects_any_bare_region(region in "[A-Za-z0-9]{1,3}") {
            let city = parsippany();
            let verifier = RowVerifier::new(&city, None, false);
            let outcome = verifier.verify(&row(["192.0.2.0/24", "US", region.as_str(), "Parsippany", ""]));
            prop_assert_eq!(kind(&outcome), Some(RowInvalidity::InvalidRegionCode));
        }
    }
}
