//! Network normalization for geofeed rows.
//!
//! Turns the first field of a geofeed row (a CIDR prefix or a bare IP address)
//! into a prefix. Bare addresses get an inferred prefix length:
//! `/32` for IPv4 and `/64` for IPv6.

use std::fmt;
use std::net::IpAddr;

use ipnet::IpNet;
use thiserror::Error;

use crate::config::{IPV4_HOST_PREFIX_LEN, IPV6_IMPLIED_PREFIX_LEN};

/// Why a network token could not be normalized.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetworkError {
    /// The token is empty.
    #[error("network field is empty")]
    Empty,

    /// The token (after prefix inference) is not a valid CIDR prefix.
    #[error("unable to parse network {token}: {source}")]
    Unparseable {
        /// Token as parsed, including any inferred prefix length
        token: String,
        /// Parser error
        source: ipnet::AddrParseError,
    },
}

/// A geofeed network in CIDR form.
///
/// Host bits are preserved: `192.0.2.1/24` stays `192.0.2.1/24`, and lookups use
/// that exact address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedNetwork {
    prefix: IpNet,
}

impl NormalizedNetwork {
    /// The prefix, including the submitted host bits.
    pub fn prefix(&self) -> IpNet {
        self.prefix
    }

    /// Address used for reference lookups.
    pub fn addr(&self) -> IpAddr {
        self.prefix.addr()
    }
}

impl fmt::Display for NormalizedNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.prefix.fmt(f)
    }
}

/// Normalizes a trimmed network token into a CIDR prefix.
///
/// # Errors
///
/// Returns `NetworkError::Empty` for an empty token and
/// `NetworkError::Unparseable` when the (completed) token is not a prefix.
pub fn normalize_network(token: &str) -> Result<NormalizedNetwork, NetworkError> {
    if token.is_empty() {
        return Err(NetworkError::Empty);
    }

    let token = if token.contains('/') {
        token.to_string()
    } else if token.contains(':') {
        format!("{token}/{IPV6_IMPLIED_PREFIX_LEN}")
    } else {
        format!("{token}/{IPV4_HOST_PREFIX_LEN}")
    };

    match token.parse::<IpNet>() {
        Ok(prefix) => Ok(NormalizedNetwork { prefix }),
        Err(source) => Err(NetworkError::Unparseable { token, source }),
    }
}
