//! Reference lookups against MaxMind databases.
//!
//! The verification engine only sees the [`CityLookup`] and [`IspLookup`]
//! capabilities; [`MaxMindReader`] is the production implementation backed by
//! a local `.mmdb` file.

mod lookup;
mod reader;
mod types;

// Re-export public API
pub use lookup::{CityLookup, IspLookup};
pub use reader::MaxMindReader;
pub use types::{CityRecord, IspRecord, LookupError};
