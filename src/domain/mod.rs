//! Domain layer containing the relay's own types.
//!
//! # Module Organization
//!
//! - `relay` - Broker endpoints and round-robin address selection
//! - `stomp` - STOMP frames as seen by the relay
//! - `infra` - AWS resource definitions for the messaging stack

pub mod infra;
pub mod relay;
pub mod stomp;
