//! BrokerConnector port - Opens transport connections to the STOMP broker.
//!
//! The WebSocket relay asks for one broker connection per client session.
//! Which broker instance answers (and whether TLS is used) is up to the
//! adapter.

use std::io;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::domain::relay::{BrokerAddress, EndpointError, SelectorError};

/// Byte stream to a broker.
pub trait BrokerStream: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T> BrokerStream for T where T: AsyncRead + AsyncWrite + Send + Unpin {}

/// An open connection and the broker instance it reached.
pub struct BrokerConnection {
    pub address: BrokerAddress,
    pub stream: Box<dyn BrokerStream>,
}

impl std::fmt::Debug for BrokerConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokerConnection")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Errors raised while reaching the broker.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid broker endpoint: {0}")]
    Endpoint(#[from] EndpointError),

    #[error("No broker addresses to connect to: {0}")]
    NoAddresses(#[from] SelectorError),

    #[error("TLS setup failed: {0}")]
    TlsSetup(#[source] tokio_native_tls::native_tls::Error),

    #[error("Connecting to broker {address} failed: {source}")]
    Connect {
        address: BrokerAddress,
        #[source]
        source: io::Error,
    },

    #[error("Connecting to broker {address} timed out")]
    Timeout { address: BrokerAddress },

    #[error("TLS handshake with broker {address} failed: {source}")]
    Handshake {
        address: BrokerAddress,
        #[source]
        source: tokio_native_tls::native_tls::Error,
    },

    #[error("All {attempts} broker addresses are unavailable; last error: {last}")]
    Unavailable {
        attempts: usize,
        #[source]
        last: Box<RelayError>,
    },
}

/// Port for opening broker connections.
#[async_trait]
pub trait BrokerConnector: Send + Sync {
    /// Opens a new connection to a broker instance.
    ///
    /// Implementations backed by several instances try them in turn and
    /// fail only when none could be reached.
    async fn connect(&self) -> Result<BrokerConnection, RelayError>;
}
