//! Decoded protocol messages delivered by an inbound binding.

use serde::{Deserialize, Serialize};

/// A service provider's request for an authentication assertion.
///
/// Immutable once received; each request is consumed by exactly one
/// SSO transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthnRequest {
    /// Entity identifier of the requesting service provider.
    pub issuer: String,
    /// Request correlation token, echoed back as `InResponseTo`.
    pub id: String,
    /// Whether the SP demands a fresh authentication of the user.
    pub force_authn: bool,
    /// Authentication context class URI the SP asked for, if any.
    pub requested_authn_context: Option<String>,
}

/// A logout request. Single logout is not handled by this engine; the
/// type exists so the validator can name what it rejects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub issuer: String,
    pub id: String,
}

/// Inbound protocol messages an `IdP`-side binding can deliver.
#[derive(Debug, Clone)]
pub enum SamlMessage {
    AuthnRequest(AuthnRequest),
    LogoutRequest(LogoutRequest),
}

impl SamlMessage {
    /// Protocol element name of this message, for error reporting.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AuthnRequest(_) => "AuthnRequest",
            Self::LogoutRequest(_) => "LogoutRequest",
        }
    }
}
