//! Application layer - Startup wiring.
//!
//! - `relay` - Turns [`RelayConfig`](crate::config::RelayConfig) into the
//!   state served by the HTTP layer

mod relay;

pub use relay::build_relay_state;
