//! STOMP broker relay configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::domain::relay::{Endpoint, EndpointError, RelayCredentials};

/// Broker relay configuration
///
/// Leaving `endpoint` unset disables the relay; the server still starts
/// but turns STOMP clients away.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Broker connection string: `host:port`, `stomp+ssl://host:port` or
    /// `failover:(stomp+ssl://host1:port1,stomp+ssl://host2:port2)`
    pub endpoint: Option<String>,

    /// Broker login for client and system sessions
    pub username: Option<String>,

    /// Broker passcode for client and system sessions
    pub password: Option<SecretString>,

    /// Wrap the broker connection in TLS
    #[serde(default)]
    pub use_ssl: bool,

    /// Destination prefixes clients may send and subscribe to (comma-separated)
    #[serde(default = "default_destination_prefixes")]
    pub destination_prefixes: String,

    /// Broker connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl RelayConfig {
    /// Parse the configured endpoint.
    ///
    /// Returns `Ok(None)` when no endpoint is configured.
    pub fn resolve_endpoint(&self) -> Result<Option<Endpoint>, EndpointError> {
        Endpoint::resolve(self.endpoint.as_deref())
    }

    /// Broker credentials, if both login and passcode are configured
    pub fn credentials(&self) -> Option<RelayCredentials> {
        match (self.username(), &self.password) {
            (Some(login), Some(passcode)) => Some(RelayCredentials::new(login, passcode.clone())),
            _ => None,
        }
    }

    /// Get destination prefixes as a vector
    pub fn destination_prefix_list(&self) -> Vec<String> {
        self.destination_prefixes
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Validate relay configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let endpoint = self.resolve_endpoint()?;

        if self.username().is_some() != self.password.is_some() {
            return Err(ValidationError::IncompleteRelayCredentials);
        }
        // CONNECT headers are sent unescaped, so a line break would start a new header.
        let has_line_break = |value: &str| value.contains(['\r', '\n']);
        if self.username.as_deref().is_some_and(has_line_break)
            || self
                .password
                .as_ref()
                .is_some_and(|p| has_line_break(p.expose_secret()))
        {
            return Err(ValidationError::RelayCredentialsLineBreak);
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 120 {
            return Err(ValidationError::InvalidConnectTimeout);
        }

        let prefixes = self.destination_prefix_list();
        if prefixes.is_empty() {
            return Err(ValidationError::NoDestinationPrefixes);
        }
        if let Some(bad) = prefixes.iter().find(|p| !p.starts_with('/')) {
            return Err(ValidationError::InvalidDestinationPrefix(bad.clone()));
        }

        if endpoint.is_some() && *environment == Environment::Production && !self.use_ssl {
            return Err(ValidationError::RelayMustUseSsl);
        }
        Ok(())
    }

    fn username(&self) -> Option<&str> {
        self.username.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            username: None,
            password: None,
            use_ssl: false,
            destination_prefixes: default_destination_prefixes(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_destination_prefixes() -> String {
    "/topic".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}
