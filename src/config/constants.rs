//! Configuration constants.
//!
//! This module defines the constants shared by the CLI and the verification engine:
//! default database location, geofeed row shape, and prefix inference rules.

/// Default path of the reference City database.
///
/// Matches the location used by MaxMind's `geoipupdate` on most Linux installs.
pub const DEFAULT_CITY_DB_PATH: &str = "/usr/local/share/GeoIP/GeoIP2-City.mmdb";

/// Number of leading fields in a geofeed row that carry meaning
/// (network, country, region, city, postal code). Extra fields are ignored.
pub const EXPECTED_FIELDS_PER_RECORD: usize = 5;

/// Comment marker for geofeed lines.
pub const COMMENT_MARKER: u8 = b'#';

/// Prefix length appended to a bare IPv4 address.
pub const IPV4_HOST_PREFIX_LEN: u8 = 32;

/// Prefix length appended to a bare IPv6 address.
///
/// A single IPv6 host is treated as its /64, not as a /128.
pub const IPV6_IMPLIED_PREFIX_LEN: u8 = 64;

/// UTF-8 byte-order mark, stripped from the start of a geofeed.
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Separator placed between the lines of one diff fragment, and between the
/// current and suggested values on a single line.
pub const DIFF_INDENT: &str = "\t\t";
