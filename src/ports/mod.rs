//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the relay and the outside world. Adapters implement these ports.
//!
//! - `BrokerConnector` - Opens transport connections to the STOMP broker

mod broker_connector;

pub use broker_connector::{BrokerConnection, BrokerConnector, BrokerStream, RelayError};
