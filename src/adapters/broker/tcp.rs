//! TCP (optionally TLS) broker connector.
//!
//! Amazon MQ only accepts TLS connections and only by DNS name, so host
//! names are resolved on every connect and double as the TLS server name.
//! Active/standby brokers are tried round-robin: a connect starts at the
//! next address in the cycle and moves on until one answers or every
//! address has been tried once.

use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time;
use tokio_native_tls::{native_tls, TlsConnector};

use crate::domain::relay::{BrokerAddress, Endpoint, RoundRobinSelector};
use crate::ports::{BrokerConnection, BrokerConnector, BrokerStream, RelayError};

/// Options for [`TcpBrokerConnector`].
#[derive(Debug, Clone)]
pub struct TcpConnectorConfig {
    /// Wrap connections in TLS.
    pub use_tls: bool,

    /// Upper bound for TCP connect plus TLS handshake, per address.
    pub connect_timeout: Duration,
}

impl Default for TcpConnectorConfig {
    fn default() -> Self {
        Self {
            use_tls: false,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl TcpConnectorConfig {
    pub fn with_tls(mut self, use_tls: bool) -> Self {
        self.use_tls = use_tls;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// Connects to the broker instances of an [`Endpoint`].
pub struct TcpBrokerConnector {
    addresses: RoundRobinSelector<BrokerAddress>,
    tls: Option<TlsConnector>,
    connect_timeout: Duration,
}

impl TcpBrokerConnector {
    /// Builds a connector for every address the endpoint names.
    pub fn from_endpoint(endpoint: &Endpoint, config: TcpConnectorConfig) -> Result<Self, RelayError> {
        Self::new(endpoint.addresses()?, config)
    }

    pub fn new(addresses: Vec<BrokerAddress>, config: TcpConnectorConfig) -> Result<Self, RelayError> {
        let addresses = RoundRobinSelector::new(addresses)?;
        let tls = if config.use_tls {
            let connector = native_tls::TlsConnector::new().map_err(RelayError::TlsSetup)?;
            Some(TlsConnector::from(connector))
        } else {
            None
        };

        Ok(Self {
            addresses,
            tls,
            connect_timeout: config.connect_timeout,
        })
    }

    /// Number of broker instances being cycled.
    pub fn address_count(&self) -> usize {
        self.addresses.size()
    }

    async fn connect_to(&self, address: &BrokerAddress) -> Result<Box<dyn BrokerStream>, RelayError> {
        let attempt = async {
            let tcp = TcpStream::connect((address.host(), address.port()))
                .await
                .map_err(|source| RelayError::Connect {
                    address: address.clone(),
                    source,
                })?;
            // STOMP frames are small and latency matters more than batching.
            tcp.set_nodelay(true).map_err(|source| RelayError::Connect {
                address: address.clone(),
                source,
            })?;

            match &self.tls {
                Some(tls) => {
                    let stream = tls.connect(address.host(), tcp).await.map_err(|source| {
                        RelayError::Handshake {
                            address: address.clone(),
                            source,
                        }
                    })?;
                    Ok::<Box<dyn BrokerStream>, RelayError>(Box::new(stream))
                }
                None => Ok(Box::new(tcp) as Box<dyn BrokerStream>),
            }
        };

        time::timeout(self.connect_timeout, attempt)
            .await
            .map_err(|_| RelayError::Timeout {
                address: address.clone(),
            })?
    }

    async fn attempt(&self, address: BrokerAddress) -> Result<BrokerConnection, RelayError> {
        match self.connect_to(&address).await {
            Ok(stream) => {
                tracing::debug!(broker = %address, tls = self.tls.is_some(), "Connected to broker");
                Ok(BrokerConnection { address, stream })
            }
            Err(e) => {
                tracing::warn!(broker = %address, error = %e, "Broker connect failed");
                Err(e)
            }
        }
    }
}

#[async_trait]
impl BrokerConnector for TcpBrokerConnector {
    async fn connect(&self) -> Result<BrokerConnection, RelayError> {
        let attempts = self.addresses.size();

        let mut last = match self.attempt(self.addresses.next().clone()).await {
            Ok(connection) => return Ok(connection),
            Err(e) => e,
        };
        for _ in 1..attempts {
            match self.attempt(self.addresses.next().clone()).await {
                Ok(connection) => return Ok(connection),
                Err(e) => last = e,
            }
        }

        if attempts == 1 {
            Err(last)
        } else {
            Err(RelayError::Unavailable {
                attempts,
                last: Box::new(last),
            })
        }
    }
}
