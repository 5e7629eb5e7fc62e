//! Outbound transport bindings and the dispatch registry.
//!
//! The engine never encodes or transmits anything itself; it maps the
//! resolved endpoint's binding identifier to a registered collaborator
//! and hands over the built assertion. Unregistered identifiers fail
//! explicitly instead of silently doing nothing.

use crate::error::{SsoError, SsoResult};
use crate::metadata::EndpointDescriptor;
use crate::saml::{Assertion, SamlBinding};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by a transport collaborator.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransmitError(pub String);

/// A transport binding collaborator. Implementations own
/// serialization, signing, and transmission; the engine treats the
/// call as an opaque effect. Not retried on failure.
#[async_trait]
pub trait OutboundBinding: Send + Sync {
    /// Transmit the assertion to the destination endpoint.
    async fn send(&self, destination: &str, assertion: &Assertion) -> Result<(), TransmitError>;
}

/// Registry mapping binding identifiers to transport collaborators.
#[derive(Default)]
pub struct BindingRegistry {
    transports: HashMap<SamlBinding, Arc<dyn OutboundBinding>>,
}

impl BindingRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transport for a binding identifier.
    ///
    /// Identifiers without a transportable profile (holder-of-key SSO,
    /// raw DEFLATE encoding) are refused, so dispatching them always
    /// fails with [`SsoError::UnsupportedBinding`].
    pub fn register(
        &mut self,
        binding: SamlBinding,
        transport: Arc<dyn OutboundBinding>,
    ) -> SsoResult<()> {
        if !binding.is_transportable() {
            return Err(SsoError::UnsupportedBinding(binding));
        }
        self.transports.insert(binding, transport);
        Ok(())
    }

    /// Hand the built assertion to the transport registered for the
    /// endpoint's binding.
    pub async fn dispatch(
        &self,
        endpoint: &EndpointDescriptor,
        assertion: &Assertion,
    ) -> SsoResult<()> {
        let transport = self
            .transports
            .get(&endpoint.binding)
            .ok_or(SsoError::UnsupportedBinding(endpoint.binding))?;

        transport
            .send(&endpoint.location, assertion)
            .await
            .map_err(|e| SsoError::Transmission(e.to_string()))?;

        tracing::info!(
            binding = %endpoint.binding,
            destination = %endpoint.location,
            "response handed to transport binding"
        );
        Ok(())
    }
}
