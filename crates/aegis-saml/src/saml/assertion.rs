//! Assertion element data model.
//!
//! These are the unsigned assertion contents handed to an outbound
//! binding collaborator; XML serialization and signing live outside
//! this crate.

use super::{attributes::Attribute, NameIdFormat};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subject name identifier, populated from the locally authenticated
/// user's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameId {
    pub value: String,
    pub format: NameIdFormat,
}

impl NameId {
    #[must_use]
    pub fn new(value: impl Into<String>, format: NameIdFormat) -> Self {
        Self {
            value: value.into(),
            format,
        }
    }
}

/// Validity constraints limiting when and by whom an assertion may be
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditions {
    pub not_before: DateTime<Utc>,
    pub not_on_or_after: DateTime<Utc>,
    /// Entity identifiers allowed to consume the assertion. Always
    /// exactly the requesting issuer.
    pub audience: Vec<String>,
}

/// Statement describing how and until when the subject is
/// authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthnStatement {
    /// Authentication context class URI.
    pub authn_context: String,
    pub session_not_on_or_after: DateTime<Utc>,
}

/// Proof method binding the assertion to the presenting party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectConfirmationMethod {
    Bearer,
    HolderOfKey,
}

impl SubjectConfirmationMethod {
    /// Returns the URI for this confirmation method.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Bearer => "urn:oasis:names:tc:SAML:2.0:cm:bearer",
            Self::HolderOfKey => "urn:oasis:names:tc:SAML:2.0:cm:holder-of-key",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectConfirmationData {
    pub not_on_or_after: DateTime<Utc>,
    /// Location of the resolved assertion consumer endpoint.
    pub recipient: String,
    /// Original request id for SP-initiated SSO; `None` for the
    /// unsolicited flow.
    pub in_response_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectConfirmation {
    pub method: SubjectConfirmationMethod,
    pub data: SubjectConfirmationData,
}

/// A fully populated, unsigned authentication assertion.
///
/// Built fresh per transaction and never persisted by this engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    /// Entity identifier of the asserting `IdP`.
    pub issuer: String,
    pub subject: NameId,
    pub conditions: Conditions,
    pub authn_statement: AuthnStatement,
    pub subject_confirmation: SubjectConfirmation,
    pub attributes: Vec<Attribute>,
}
