//! Builds the unsigned assertion for a validated transaction.

use crate::config::IdpConfig;
use crate::engine::AuthenticatedSubject;
use crate::metadata::EndpointDescriptor;
use crate::saml::{
    Assertion, AttributeResolver, AuthnRequest, AuthnStatement, Conditions, SamlBinding,
    SubjectConfirmation, SubjectConfirmationData, SubjectConfirmationMethod,
    AUTHN_CONTEXT_PASSWORD,
};
use chrono::{Duration, Utc};
use std::sync::Arc;

/// Clock-skew tolerance applied to the front edge of the validity
/// window, in seconds.
const NOT_BEFORE_SKEW_SECONDS: i64 = 30;

/// Assembles assertion contents for a validated request and its
/// resolved destination. Pure over trust-store and config data; never
/// serializes or signs.
pub struct AssertionBuilder {
    idp_entity_id: String,
    assertion_lifetime: Duration,
    session_lifetime: Duration,
    attribute_resolver: Arc<dyn AttributeResolver>,
}

impl AssertionBuilder {
    #[must_use]
    pub fn new(config: &IdpConfig, attribute_resolver: Arc<dyn AttributeResolver>) -> Self {
        Self {
            idp_entity_id: config.entity_id.clone(),
            assertion_lifetime: Duration::seconds(i64::from(config.assertion_lifetime_secs)),
            session_lifetime: Duration::minutes(i64::from(config.session_lifetime_mins)),
            attribute_resolver,
        }
    }

    /// Build the assertion for `audience` (the requesting entity's
    /// issuer). `request` is `None` for the unsolicited `IdP`-initiated
    /// flow, in which case no `InResponseTo` is carried.
    ///
    /// The subject-confirmation method is holder-of-key exactly when
    /// the resolved endpoint's binding is the holder-of-key SSO
    /// binding; holder-of-key key material is the signing
    /// collaborator's concern.
    #[must_use]
    pub fn build(
        &self,
        request: Option<&AuthnRequest>,
        endpoint: &EndpointDescriptor,
        subject: &AuthenticatedSubject,
        audience: &str,
    ) -> Assertion {
        let now = Utc::now();
        let not_on_or_after = now + self.assertion_lifetime;

        let conditions = Conditions {
            not_before: now - Duration::seconds(NOT_BEFORE_SKEW_SECONDS),
            not_on_or_after,
            audience: vec![audience.to_string()],
        };

        let authn_context = request
            .and_then(|r| r.requested_authn_context.clone())
            .unwrap_or_else(|| AUTHN_CONTEXT_PASSWORD.to_string());

        let authn_statement = AuthnStatement {
            authn_context,
            session_not_on_or_after: now + self.session_lifetime,
        };

        let method = if endpoint.binding == SamlBinding::HolderOfKeySso {
            SubjectConfirmationMethod::HolderOfKey
        } else {
            SubjectConfirmationMethod::Bearer
        };

        let subject_confirmation = SubjectConfirmation {
            method,
            data: SubjectConfirmationData {
                not_on_or_after,
                recipient: endpoint.location.clone(),
                in_response_to: request.map(|r| r.id.clone()),
            },
        };

        let attributes = self.attribute_resolver.requested_attributes(audience);

        Assertion {
            issuer: self.idp_entity_id.clone(),
            subject: subject.name_id.clone(),
            conditions,
            authn_statement,
            subject_confirmation,
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::EndpointCategory;
    use crate::saml::{Attribute, NameId, NameIdFormat, StaticAttributeResolver};

    fn builder() -> AssertionBuilder {
        let mut resolver = StaticAttributeResolver::new();
        resolver.insert(
            "https://sp.example.com",
            vec![Attribute::new("mail", vec!["user@example.com".to_string()])],
        );
        AssertionBuilder::new(
            &IdpConfig::new("https://idp.example.com"),
            Arc::new(resolver),
        )
    }

    fn request(id: &str) -> AuthnRequest {
        AuthnRequest {
            issuer: "https://sp.example.com".to_string(),
            id: id.to_string(),
            force_authn: false,
            requested_authn_context: None,
        }
    }

    fn subject() -> AuthenticatedSubject {
        AuthenticatedSubject {
            name_id: NameId::new("user@example.com", NameIdFormat::Email),
        }
    }

    fn acs_endpoint(binding: SamlBinding) -> EndpointDescriptor {
        EndpointDescriptor::new(
            EndpointCategory::AssertionConsumerService,
            binding,
            "https://sp.example.com/acs",
        )
    }

    #[test]
    fn conditions_cover_audience_and_skew() {
        let assertion = builder().build(
            Some(&request("req-1")),
            &acs_endpoint(SamlBinding::HttpPost),
            &subject(),
            "https://sp.example.com",
        );

        assert_eq!(assertion.issuer, "https://idp.example.com");
        assert_eq!(
            assertion.conditions.audience,
            vec!["https://sp.example.com".to_string()]
        );
        assert!(assertion.conditions.not_before < assertion.conditions.not_on_or_after);

        // notBefore sits 30 seconds behind evaluation time.
        let skew = Utc::now() - assertion.conditions.not_before;
        assert!(skew >= Duration::seconds(29) && skew <= Duration::seconds(32));
    }

    #[test]
    fn confirmation_data_echoes_request_and_endpoint() {
        let assertion = builder().build(
            Some(&request("req-42")),
            &acs_endpoint(SamlBinding::HttpPost),
            &subject(),
            "https://sp.example.com",
        );

        let data = &assertion.subject_confirmation.data;
        assert_eq!(data.in_response_to.as_deref(), Some("req-42"));
        assert_eq!(data.recipient, "https://sp.example.com/acs");
        assert_eq!(
            assertion.subject_confirmation.method,
            SubjectConfirmationMethod::Bearer
        );
    }

    #[test]
    fn holder_of_key_binding_switches_confirmation_method() {
        let assertion = builder().build(
            Some(&request("req-1")),
            &acs_endpoint(SamlBinding::HolderOfKeySso),
            &subject(),
            "https://sp.example.com",
        );
        assert_eq!(
            assertion.subject_confirmation.method,
            SubjectConfirmationMethod::HolderOfKey
        );
    }

    #[test]
    fn requested_authn_context_overrides_password_default() {
        let mut req = request("req-1");
        let assertion = builder().build(
            Some(&req),
            &acs_endpoint(SamlBinding::HttpPost),
            &subject(),
            "https://sp.example.com",
        );
        assert_eq!(assertion.authn_statement.authn_context, AUTHN_CONTEXT_PASSWORD);

        req.requested_authn_context =
            Some("urn:oasis:names:tc:SAML:2.0:ac:classes:X509".to_string());
        let assertion = builder().build(
            Some(&req),
            &acs_endpoint(SamlBinding::HttpPost),
            &subject(),
            "https://sp.example.com",
        );
        assert_eq!(
            assertion.authn_statement.authn_context,
            "urn:oasis:names:tc:SAML:2.0:ac:classes:X509"
        );
    }

    #[test]
    fn unsolicited_assertion_has_no_in_response_to() {
        let assertion = builder().build(
            None,
            &acs_endpoint(SamlBinding::HttpPost),
            &subject(),
            "https://sp.example.com",
        );
        assert!(assertion.subject_confirmation.data.in_response_to.is_none());
    }

    #[test]
    fn attributes_come_from_the_release_seam() {
        let assertion = builder().build(
            Some(&request("req-1")),
            &acs_endpoint(SamlBinding::HttpPost),
            &subject(),
            "https://sp.example.com",
        );
        assert_eq!(assertion.attributes.len(), 1);
        assert_eq!(assertion.attributes[0].name, "mail");
        assert_eq!(assertion.subject.value, "user@example.com");
    }
}
