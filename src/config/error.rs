//! Configuration error types

use thiserror::Error;

use crate::domain::relay::EndpointError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid server address: {0}")]
    InvalidAddress(String),

    #[error("WebSocket path must start with '/' and not clash with /health")]
    InvalidWebSocketPath,

    #[error("Invalid relay endpoint: {0}")]
    InvalidRelayEndpoint(#[from] EndpointError),

    #[error("Relay username and password must be set together")]
    IncompleteRelayCredentials,

    #[error("Relay username and password must not contain line breaks")]
    RelayCredentialsLineBreak,

    #[error("Relay connect timeout must be between 1 and 120 seconds")]
    InvalidConnectTimeout,

    #[error("At least one relay destination prefix is required")]
    NoDestinationPrefixes,

    #[error("Relay destination prefix must start with '/': {0}")]
    InvalidDestinationPrefix(String),

    #[error("Relay must use SSL in production")]
    RelayMustUseSsl,
}
