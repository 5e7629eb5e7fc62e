//! Inbound message validation against the trust store.

use crate::error::{SsoError, SsoResult};
use crate::metadata::{EntityDescriptor, MetadataStore};
use crate::saml::{AuthnRequest, SamlMessage};

/// Checks an inbound message is the expected request type and that its
/// issuer has a trust relationship with this `IdP`. Mutates nothing.
pub struct RequestValidator;

impl RequestValidator {
    /// Returns the validated request together with the requesting
    /// entity's metadata.
    pub fn validate<'a>(
        message: SamlMessage,
        store: &'a dyn MetadataStore,
    ) -> SsoResult<(AuthnRequest, &'a EntityDescriptor)> {
        let request = match message {
            SamlMessage::AuthnRequest(request) => request,
            other => return Err(SsoError::Protocol(other.kind().to_string())),
        };

        let entity = store
            .entity_descriptor(&request.issuer)
            .ok_or_else(|| SsoError::UntrustedIssuer(request.issuer.clone()))?;

        tracing::debug!(
            sp_entity_id = %request.issuer,
            request_id = %request.id,
            "AuthnRequest issuer validated"
        );

        Ok((request, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::InMemoryMetadataStore;
    use crate::saml::LogoutRequest;

    fn store_with(entity_id: &str) -> InMemoryMetadataStore {
        let mut store = InMemoryMetadataStore::new();
        store.insert(EntityDescriptor::new(entity_id));
        store
    }

    fn authn_request(issuer: &str) -> SamlMessage {
        SamlMessage::AuthnRequest(AuthnRequest {
            issuer: issuer.to_string(),
            id: "req-1".to_string(),
            force_authn: false,
            requested_authn_context: None,
        })
    }

    #[test]
    fn trusted_issuer_passes() {
        let store = store_with("https://sp.example.com");
        let (request, entity) =
            RequestValidator::validate(authn_request("https://sp.example.com"), &store).unwrap();
        assert_eq!(request.id, "req-1");
        assert_eq!(entity.entity_id, "https://sp.example.com");
    }

    #[test]
    fn unknown_issuer_is_a_trust_error() {
        let store = store_with("https://sp.example.com");
        let err =
            RequestValidator::validate(authn_request("https://unknown-sp.example.com"), &store)
                .unwrap_err();
        assert!(matches!(err, SsoError::UntrustedIssuer(id) if id.contains("unknown-sp")));
    }

    #[test]
    fn wrong_message_type_is_a_protocol_error() {
        let store = store_with("https://sp.example.com");
        let message = SamlMessage::LogoutRequest(LogoutRequest {
            issuer: "https://sp.example.com".to_string(),
            id: "lo-1".to_string(),
        });
        let err = RequestValidator::validate(message, &store).unwrap_err();
        assert!(matches!(err, SsoError::Protocol(kind) if kind == "LogoutRequest"));
    }
}
