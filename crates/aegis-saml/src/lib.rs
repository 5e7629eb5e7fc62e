//! SAML 2.0 Identity Provider SSO engine
//!
//! This crate is the trust-decision and assertion-construction core of
//! a SAML2 `IdP`:
//! - `AuthnRequest` validation against a metadata trust store
//! - Assertion consumer endpoint negotiation with the metadata
//!   default-marker tie-break rules
//! - Unsigned assertion construction (conditions, authn statement,
//!   subject confirmation, released attributes)
//! - Forced re-authentication as a parked continuation keyed by
//!   request id, resumed by an external signal
//! - Dispatch to registered transport binding collaborators
//!
//! Wire codecs, XML signing, metadata parsing, credential checks, and
//! HTTP plumbing are external collaborators behind the traits in
//! [`metadata`], [`saml::attributes`], [`bindings`], and [`session`].

pub mod bindings;
pub mod config;
pub mod engine;
pub mod error;
pub mod metadata;
pub mod saml;
pub mod services;
pub mod session;

pub use bindings::{BindingRegistry, OutboundBinding};
pub use config::IdpConfig;
pub use engine::{AuthenticatedSubject, SsoEngine, SsoOutcome};
pub use error::{SsoError, SsoResult};
pub use metadata::{
    EndpointCategory, EndpointDescriptor, EntityDescriptor, InMemoryMetadataStore, MetadataStore,
};
pub use saml::SamlBinding;
pub use services::assertion_builder::AssertionBuilder;
pub use services::endpoint_resolver::{EndpointOverrides, EndpointResolver};
pub use services::validator::RequestValidator;
pub use session::{
    InMemoryTransactionStore, SsoState, SsoTransaction, TransactionError, TransactionStore,
};
