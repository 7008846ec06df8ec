//! Invalid row classification.
//!
//! Builds the single [`RowOutcome::Invalid`] reported for a rejected row. Messages
//! quote the offending content but never file paths; the aggregator adds the
//! line number.

use std::fmt::Display;

use super::result::RowOutcome;
use super::row::GeofeedRow;
use crate::config::EXPECTED_FIELDS_PER_RECORD;
use crate::error_handling::RowInvalidity;
use crate::geoip::LookupError;
use crate::network::NetworkError;

fn invalid(kind: RowInvalidity, message: String) -> RowOutcome {
    RowOutcome::Invalid { kind, message }
}

/// A CSV record with fewer than five fields.
pub(crate) fn fewer_fields<S: AsRef<str>>(fields: &[S]) -> RowOutcome {
    let joined = fields
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(",");
    invalid(
        RowInvalidity::FewerFieldsThanExpected,
        format!(
            "expected {} fields but got {}, row: '{}'",
            EXPECTED_FIELDS_PER_RECORD,
            fields.len(),
            joined
        ),
    )
}

/// A network field that failed normalization.
pub(crate) fn bad_network(row: &GeofeedRow, err: &NetworkError) -> RowOutcome {
    match err {
        NetworkError::Empty => invalid(
            RowInvalidity::EmptyNetwork,
            format!("network field is empty, row: '{}'", row.to_csv_line()),
        ),
        NetworkError::Unparseable { .. } => {
            invalid(RowInvalidity::UnableToParseNetwork, err.to_string())
        }
    }
}

/// No usable City record for the row's address.
pub(crate) fn missing_city_record(network: impl Display, err: &LookupError) -> RowOutcome {
    invalid(
        RowInvalidity::UnableToFindCityRecord,
        format!("unable to find city record for {network}: {err}"),
    )
}

/// No usable ISP record for the row's address.
pub(crate) fn missing_isp_record(network: impl Display, err: &LookupError) -> RowOutcome {
    invalid(
        RowInvalidity::UnableToFindISPRecord,
        format!("unable to find ISP record for {network}: {err}"),
    )
}

/// A bare region code in strict mode.
pub(crate) fn invalid_region_code(row: &GeofeedRow) -> RowOutcome {
    invalid(
        RowInvalidity::InvalidRegionCode,
        format!(
            "invalid ISO 3166-2 region code format in strict (default) mode, row: '{}'",
            row.to_csv_line()
        ),
    )
}
