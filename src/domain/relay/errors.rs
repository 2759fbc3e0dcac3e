//! Error types for broker endpoint resolution and address selection.

use thiserror::Error;

/// Errors raised while resolving a broker connection string.
///
/// All of these are fatal at startup: the relay cannot be configured from
/// a string it does not understand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error(
        "Invalid endpoint string (must either consist of hostname and port or a failover URI): {0}"
    )]
    InvalidFormat(String),

    #[error("Port out of range in endpoint: {0}")]
    InvalidPort(String),

    #[error("Endpoint has an empty host: {0}")]
    EmptyHost(String),

    #[error("Malformed host entry '{entry}' in failover URI")]
    MalformedHost { entry: String },

    #[error("Failover URI lists no hosts: {0}")]
    NoFailoverHosts(String),
}

impl EndpointError {
    /// Creates a malformed host error for a single `host:port` entry.
    pub fn malformed_host(entry: impl Into<String>) -> Self {
        EndpointError::MalformedHost {
            entry: entry.into(),
        }
    }
}

/// Errors raised by [`RoundRobinSelector`](super::RoundRobinSelector).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("Round-robin selector requires at least one element")]
    EmptyCollection,
}
