//! Builds the relay from configuration.

use std::sync::Arc;

use crate::adapters::broker::{TcpBrokerConnector, TcpConnectorConfig};
use crate::adapters::websocket::{RelayPolicy, RelayState};
use crate::config::RelayConfig;
use crate::domain::relay::{Endpoint, RelayMode};
use crate::ports::RelayError;

/// Resolves the configured endpoint once and wires the connector, policy
/// and state the HTTP layer needs.
///
/// # Errors
///
/// Returns [`RelayError::Endpoint`] if the endpoint string cannot be parsed,
/// or a TLS setup error if `use_ssl` is set and no TLS backend is available.
pub fn build_relay_state(config: &RelayConfig) -> Result<RelayState, RelayError> {
    let endpoint = config.resolve_endpoint()?;
    let policy = RelayPolicy::new(config.credentials(), config.destination_prefix_list());

    let Some(endpoint) = endpoint else {
        tracing::warn!("No relay endpoint configured, STOMP clients will be refused");
        return Ok(RelayState::disabled(policy));
    };

    let connector = build_connector(&endpoint, config)?;
    let mode = RelayMode::from(Some(&endpoint));
    tracing::info!(
        endpoint = %endpoint,
        brokers = connector.address_count(),
        tls = config.use_ssl,
        "STOMP broker relay configured"
    );

    Ok(RelayState::new(Arc::new(connector), policy, mode))
}

fn build_connector(endpoint: &Endpoint, config: &RelayConfig) -> Result<TcpBrokerConnector, RelayError> {
    let connector_config = TcpConnectorConfig::default()
        .with_tls(config.use_ssl)
        .with_connect_timeout(config.connect_timeout());
    TcpBrokerConnector::from_endpoint(endpoint, connector_config)
}
