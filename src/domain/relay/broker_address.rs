//! A single broker host and port.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::errors::EndpointError;

/// Host name and TCP port of one broker instance.
///
/// The host is kept as a name rather than an IP address: Amazon MQ brokers
/// are only reachable by DNS name, which TLS also needs for SNI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BrokerAddress {
    host: String,
    port: u16,
}

impl BrokerAddress {
    /// Creates an address, rejecting an empty host.
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, EndpointError> {
        let host = host.into();
        if host.is_empty() {
            return Err(EndpointError::EmptyHost(format!(":{}", port)));
        }
        Ok(Self { host, port })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for BrokerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for BrokerAddress {
    type Err = EndpointError;

    /// Parses `host:port`. The port is whatever follows the last colon.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| EndpointError::malformed_host(s))?;

        if host.is_empty() || host.contains('/') {
            return Err(EndpointError::malformed_host(s));
        }
        if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EndpointError::malformed_host(s));
        }
        let port: u16 = port
            .parse()
            .map_err(|_| EndpointError::InvalidPort(s.to_string()))?;

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}
