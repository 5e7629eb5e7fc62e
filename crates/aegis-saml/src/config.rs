//! `IdP` configuration, passed into the engine by composition.

use crate::saml::SamlBinding;
use serde::{Deserialize, Serialize};

/// Configuration for one `IdP` deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdpConfig {
    /// Entity identifier this `IdP` asserts as issuer.
    pub entity_id: String,

    /// Assertion validity window, in seconds.
    #[serde(default = "default_assertion_lifetime")]
    pub assertion_lifetime_secs: u32,

    /// Authenticated session validity, in minutes.
    #[serde(default = "default_session_lifetime")]
    pub session_lifetime_mins: u32,

    /// Bindings this deployment can answer on for the assertion
    /// consumer category.
    #[serde(default = "default_supported_bindings")]
    pub supported_bindings: Vec<SamlBinding>,

    /// How long a transaction parked for re-authentication stays
    /// resumable, in seconds.
    #[serde(default = "default_transaction_ttl")]
    pub transaction_ttl_secs: u32,
}

impl IdpConfig {
    /// Configuration with default lifetimes for the given entity id.
    #[must_use]
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            assertion_lifetime_secs: default_assertion_lifetime(),
            session_lifetime_mins: default_session_lifetime(),
            supported_bindings: default_supported_bindings(),
            transaction_ttl_secs: default_transaction_ttl(),
        }
    }
}

fn default_assertion_lifetime() -> u32 {
    300
}

fn default_session_lifetime() -> u32 {
    480
}

fn default_supported_bindings() -> Vec<SamlBinding> {
    vec![SamlBinding::HttpPost]
}

fn default_transaction_ttl() -> u32 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied() {
        let config = IdpConfig::new("https://idp.example.com");
        assert_eq!(config.assertion_lifetime_secs, 300);
        assert_eq!(config.session_lifetime_mins, 480);
        assert_eq!(config.supported_bindings, vec![SamlBinding::HttpPost]);
    }
}
