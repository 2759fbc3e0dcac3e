//! Relay mode reported by the health endpoint.

use serde::Serialize;

use super::endpoint::Endpoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelayMode {
    /// No endpoint configured; STOMP clients are turned away.
    Disabled,
    SingleHost,
    MultiHost,
}

impl RelayMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, RelayMode::Disabled)
    }
}

impl From<Option<&Endpoint>> for RelayMode {
    fn from(endpoint: Option<&Endpoint>) -> Self {
        match endpoint {
            None => RelayMode::Disabled,
            Some(Endpoint::SingleHost { .. }) => RelayMode::SingleHost,
            Some(Endpoint::MultiHost { .. }) => RelayMode::MultiHost,
        }
    }
}
