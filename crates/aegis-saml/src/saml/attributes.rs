//! Assertion attribute types and the release-policy seam.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A resolved SAML attribute ready for inclusion in an assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub friendly_name: Option<String>,
    pub values: Vec<String>,
}

impl Attribute {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            friendly_name: None,
            values,
        }
    }
}

/// Resolves which attributes are released to a given relying party.
///
/// Release policy is owned by the deployment, not this engine; the
/// assertion builder only asks for the set keyed by the requesting
/// issuer.
pub trait AttributeResolver: Send + Sync {
    fn requested_attributes(&self, issuer: &str) -> Vec<Attribute>;
}

/// Fixed attribute sets keyed by relying party, for deployments with a
/// static release policy and for tests.
#[derive(Debug, Default)]
pub struct StaticAttributeResolver {
    by_issuer: HashMap<String, Vec<Attribute>>,
}

impl StaticAttributeResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, issuer: impl Into<String>, attributes: Vec<Attribute>) {
        self.by_issuer.insert(issuer.into(), attributes);
    }
}

impl AttributeResolver for StaticAttributeResolver {
    fn requested_attributes(&self, issuer: &str) -> Vec<Attribute> {
        self.by_issuer.get(issuer).cloned().unwrap_or_default()
    }
}
