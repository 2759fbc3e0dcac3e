//! Broker login used for every relayed session.

use secrecy::{ExposeSecret, SecretString};

/// Login and passcode the relay presents to the broker, replacing whatever
/// the WebSocket client sent.
#[derive(Debug, Clone)]
pub struct RelayCredentials {
    login: String,
    passcode: SecretString,
}

impl RelayCredentials {
    pub fn new(login: impl Into<String>, passcode: SecretString) -> Self {
        Self {
            login: login.into(),
            passcode,
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn passcode(&self) -> &str {
        self.passcode.expose_secret()
    }
}
