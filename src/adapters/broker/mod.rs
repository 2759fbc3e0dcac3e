//! Broker connector adapters.

mod tcp;

pub use tcp::{TcpBrokerConnector, TcpConnectorConfig};
