//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the relay to external systems:
//! - `broker` - TCP/TLS connections to the STOMP broker
//! - `websocket` - STOMP-over-WebSocket client sessions
//! - `http` - Router assembly and health endpoint

pub mod broker;
pub mod http;
pub mod websocket;

pub use broker::{TcpBrokerConnector, TcpConnectorConfig};
pub use http::app_router;
pub use websocket::{RelayPolicy, RelayState};
