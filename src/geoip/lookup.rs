//! Lookup capabilities consumed by the row verifier.
//!
//! Both lookups are synchronous, side-effect-free reads against an already
//! opened dataset. A failed lookup only invalidates the row being checked.

use std::net::IpAddr;

use super::types::{CityRecord, IspRecord, LookupError};

/// Looks up country, subdivision, city and postal data for an address.
pub trait CityLookup {
    /// Returns the City record for `addr`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::NotFound` when the database has no data for the
    /// address, or `LookupError::Database` when the read fails.
    fn lookup_city(&self, addr: IpAddr) -> Result<CityRecord, LookupError>;
}

/// Looks up AS number, AS organization and ISP name for an address.
pub trait IspLookup {
    /// Returns the ISP record for `addr`.
    ///
    /// # Errors
    ///
    /// Same contract as [`CityLookup::lookup_city`].
    fn lookup_isp(&self, addr: IpAddr) -> Result<IspRecord, LookupError>;
}
