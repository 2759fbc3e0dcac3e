//! Broker relay domain types.
//!
//! - `endpoint` - Parsing broker connection strings into [`Endpoint`]
//! - `round_robin` - [`RoundRobinSelector`] for cycling through broker addresses
//! - `broker_address` - A single `host:port` pair
//! - `credentials` - Broker login injected into relayed sessions
//! - `mode` - How the relay is set up, derived from the endpoint

mod broker_address;
mod credentials;
mod endpoint;
mod errors;
mod mode;
mod round_robin;

pub use broker_address::BrokerAddress;
pub use credentials::RelayCredentials;
pub use endpoint::Endpoint;
pub use errors::{EndpointError, SelectorError};
pub use mode::RelayMode;
pub use round_robin::RoundRobinSelector;
