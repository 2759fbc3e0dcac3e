//! Deployment context for the messaging stack.

use std::collections::HashMap;

use super::environment::ApplicationEnvironment;
use super::errors::InfraError;

/// Values every synthesis run must be given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingContext {
    pub environment_name: String,
    pub application_name: String,
    pub account_id: String,
    pub region: String,
}

impl MessagingContext {
    /// Reads the context from `key=value` pairs, as passed with `-c` on the
    /// command line.
    ///
    /// # Errors
    ///
    /// Returns [`InfraError::MissingContext`] naming the first of
    /// `environmentName`, `applicationName`, `accountId`, `region` that is
    /// absent or empty.
    pub fn from_values(values: &HashMap<String, String>) -> Result<Self, InfraError> {
        Ok(Self {
            environment_name: require(values, "environmentName")?,
            application_name: require(values, "applicationName")?,
            account_id: require(values, "accountId")?,
            region: require(values, "region")?,
        })
    }

    pub fn application_environment(&self) -> ApplicationEnvironment {
        ApplicationEnvironment::new(&self.application_name, &self.environment_name)
    }
}

fn require(values: &HashMap<String, String>, key: &'static str) -> Result<String, InfraError> {
    values
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(InfraError::MissingContext(key))
}
