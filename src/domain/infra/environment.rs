//! Application environment naming.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An application deployed into a named environment (e.g. `todo` in
/// `staging`).
///
/// Every resource name is prefixed with `{environment}-{application}` so
/// several environments can share one AWS account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationEnvironment {
    application_name: String,
    environment_name: String,
}

impl ApplicationEnvironment {
    pub fn new(application_name: impl Into<String>, environment_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
            environment_name: environment_name.into(),
        }
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    pub fn environment_name(&self) -> &str {
        &self.environment_name
    }

    /// Prefixes a resource name with this environment.
    pub fn prefix(&self, name: &str) -> String {
        format!("{}-{}", self, name)
    }
}

impl fmt::Display for ApplicationEnvironment {
    /// `{environment}-{application}` with everything but ASCII
    /// alphanumerics and `-` removed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = format!("{}-{}", self.environment_name, self.application_name);
        let sanitized: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        f.write_str(&sanitized)
    }
}
