//! Engine error taxonomy.

use crate::metadata::EndpointCategory;
use crate::saml::SamlBinding;
use crate::session::TransactionError;
use thiserror::Error;

/// Result type for SSO engine operations.
pub type SsoResult<T> = Result<T, SsoError>;

/// Errors surfaced to the invoking controller. None of these are
/// retried inside the engine, and no response is transmitted on any
/// failure path.
#[derive(Debug, Error)]
pub enum SsoError {
    /// Inbound message was not the expected request type. No
    /// transaction is created.
    #[error("Wrong message type received: expected an AuthnRequest, got {0}")]
    Protocol(String),

    /// The message issuer has no trust relationship with this `IdP`.
    #[error("Unknown entity: no trust relationship with {0}")]
    UntrustedIssuer(String),

    /// No published or fallback endpoint satisfied the selection
    /// constraints. The assertion is never built.
    #[error("No usable {category} endpoint for entity {entity_id}")]
    EndpointResolution {
        entity_id: String,
        category: EndpointCategory,
    },

    /// The selected endpoint's binding has no registered transport.
    /// Occurs after the assertion is built, before transmission.
    #[error("No transport registered for binding {0}")]
    UnsupportedBinding(SamlBinding),

    /// Parked-transaction table errors: duplicate, missing, expired,
    /// or already-consumed continuations.
    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    /// The outbound binding collaborator failed to transmit.
    #[error("Transmission failed: {0}")]
    Transmission(String),
}
