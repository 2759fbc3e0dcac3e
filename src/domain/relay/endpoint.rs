//! Broker endpoint resolution.
//!
//! Amazon MQ hands out broker URLs in two shapes:
//!
//! - a single instance: `stomp+ssl://b-1234.mq.eu-central-1.amazonaws.com:61614`
//! - an active/standby pair as an ActiveMQ failover URI:
//!   `failover:(stomp+ssl://b-1-1.mq...:61614,stomp+ssl://b-1-2.mq...:61614)`
//!
//! The TCP client only wants host and port, so the protocol part is
//! stripped and failover URIs are broken up into their `host:port` entries.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use super::broker_address::BrokerAddress;
use super::errors::EndpointError;

const STOMP_SSL_SCHEME: &str = "stomp+ssl://";

static HOST_AND_PORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*):([0-9]+)$").expect("host and port pattern is valid"));

static FAILOVER_URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^failover:\((.*)\)$").expect("failover pattern is valid"));

/// Where the relay should connect to.
///
/// Resolved once when configuration is loaded and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// One broker instance.
    SingleHost { host: String, port: u16 },

    /// Several broker instances, each as `host:port`, in the order the
    /// failover URI listed them.
    MultiHost { hosts: Vec<String> },
}

impl Endpoint {
    /// Resolves an optional connection string.
    ///
    /// Absent or blank input means no relay is configured and yields
    /// `Ok(None)`.
    pub fn resolve(raw: Option<&str>) -> Result<Option<Self>, EndpointError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }

    /// Addresses to connect to, in connection order.
    pub fn addresses(&self) -> Result<Vec<BrokerAddress>, EndpointError> {
        match self {
            Endpoint::SingleHost { host, port } => Ok(vec![BrokerAddress::new(host.clone(), *port)?]),
            Endpoint::MultiHost { hosts } => hosts.iter().map(|h| h.parse()).collect(),
        }
    }

    pub fn is_multi_host(&self) -> bool {
        matches!(self, Endpoint::MultiHost { .. })
    }

    fn parse_failover_hosts(raw: &str, inner: &str) -> Result<Self, EndpointError> {
        if inner.trim().is_empty() {
            return Err(EndpointError::NoFailoverHosts(raw.to_string()));
        }

        let hosts = inner
            .split(',')
            .map(|entry| {
                let entry = entry.trim();
                let (_, host_and_port) = entry
                    .split_once("//")
                    .ok_or_else(|| EndpointError::malformed_host(entry))?;
                let address: BrokerAddress = host_and_port
                    .parse()
                    .map_err(|_| EndpointError::malformed_host(entry))?;
                Ok(address.to_string())
            })
            .collect::<Result<Vec<_>, EndpointError>>()?;

        Ok(Endpoint::MultiHost { hosts })
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(captures) = HOST_AND_PORT.captures(s) {
            let host = captures[1].replace(STOMP_SSL_SCHEME, "");
            let port = captures[2]
                .parse::<u16>()
                .map_err(|_| EndpointError::InvalidPort(s.to_string()))?;
            if host.is_empty() {
                return Err(EndpointError::EmptyHost(s.to_string()));
            }
            return Ok(Endpoint::SingleHost { host, port });
        }

        if let Some(captures) = FAILOVER_URI.captures(s) {
            return Self::parse_failover_hosts(s, &captures[1]);
        }

        Err(EndpointError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::SingleHost { host, port } => write!(f, "{}:{}", host, port),
            Endpoint::MultiHost { hosts } => write!(f, "failover:({})", hosts.join(",")),
        }
    }
}
