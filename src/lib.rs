//! Stomp Relay - STOMP-over-WebSocket relay to an external message broker
//!
//! Browsers speak STOMP over a WebSocket to this server; every session is
//! relayed over TCP (TLS for Amazon MQ) to an ActiveMQ broker given as a
//! single `host:port` or as an active/standby failover URI.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
