//! The SSO state machine: validate, park or proceed, resolve, build,
//! dispatch.

use crate::bindings::BindingRegistry;
use crate::config::IdpConfig;
use crate::error::{SsoError, SsoResult};
use crate::metadata::{EndpointCategory, MetadataStore};
use crate::saml::{AttributeResolver, AuthnRequest, NameId, SamlBinding, SamlMessage};
use crate::services::{AssertionBuilder, EndpointOverrides, EndpointResolver, RequestValidator};
use crate::session::{SsoState, SsoTransaction, TransactionStore};
use std::sync::Arc;

/// The locally authenticated user identity, as established by the
/// deployment's credential layer. The engine never derives the name
/// identifier itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSubject {
    pub name_id: NameId,
}

/// What the engine did with an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SsoOutcome {
    /// Response built and handed to the transport binding. Terminal.
    Sent {
        /// Correlation id of the answered request; `None` for the
        /// unsolicited flow.
        request_id: Option<String>,
        destination: String,
        binding: SamlBinding,
    },
    /// Transaction parked awaiting re-authentication. Resume with
    /// [`SsoEngine::resume`] and the same request id once the user is
    /// re-authenticated.
    PendingReauth { request_id: String },
}

/// `IdP`-side SSO engine. One instance serves many concurrent
/// transactions; each inbound message is processed synchronously
/// except for the parked re-authentication continuation.
pub struct SsoEngine {
    config: IdpConfig,
    metadata: Arc<dyn MetadataStore>,
    transactions: Arc<dyn TransactionStore>,
    bindings: BindingRegistry,
    builder: AssertionBuilder,
}

impl SsoEngine {
    pub fn new(
        config: IdpConfig,
        metadata: Arc<dyn MetadataStore>,
        transactions: Arc<dyn TransactionStore>,
        bindings: BindingRegistry,
        attribute_resolver: Arc<dyn AttributeResolver>,
    ) -> Self {
        let builder = AssertionBuilder::new(&config, attribute_resolver);
        Self {
            config,
            metadata,
            transactions,
            bindings,
            builder,
        }
    }

    /// Process one inbound message end to end.
    ///
    /// `subject` is the currently authenticated local identity, if
    /// any. When the request demands forced re-authentication, or no
    /// sufficient authentication exists, the transaction is parked and
    /// control returns without a response being sent; otherwise the
    /// response is resolved, built, and dispatched in one pass.
    pub async fn handle(
        &self,
        message: SamlMessage,
        subject: Option<&AuthenticatedSubject>,
    ) -> SsoResult<SsoOutcome> {
        let (request, _entity) = RequestValidator::validate(message, self.metadata.as_ref())?;

        tracing::info!(
            sp_entity_id = %request.issuer,
            request_id = %request.id,
            force_authn = request.force_authn,
            "AuthnRequest received"
        );

        let subject = match subject {
            Some(subject) if !request.force_authn => subject,
            _ => return self.park(request).await,
        };

        self.respond(&request, subject).await
    }

    /// Complete a parked transaction after the external
    /// re-authentication signal. Consumes the continuation; a second
    /// resume for the same request id fails.
    pub async fn resume(
        &self,
        request_id: &str,
        subject: &AuthenticatedSubject,
    ) -> SsoResult<SsoOutcome> {
        let transaction = self.transactions.consume(request_id).await?;

        tracing::info!(
            sp_entity_id = %transaction.request.issuer,
            request_id = %request_id,
            "resuming parked SSO transaction"
        );

        match self.respond(&transaction.request, subject).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                // Terminal failure: drop the continuation so the id is
                // not left dangling in the table.
                if let Err(remove_err) = self.transactions.remove(request_id).await {
                    tracing::warn!(
                        request_id = %request_id,
                        error = %remove_err,
                        "failed to drop transaction after terminal failure"
                    );
                }
                Err(e)
            }
        }
    }

    /// `IdP`-initiated (unsolicited) SSO toward a known relying party.
    /// No transaction is parked and the assertion carries no
    /// `InResponseTo`.
    pub async fn initiate(
        &self,
        sp_entity_id: &str,
        subject: &AuthenticatedSubject,
    ) -> SsoResult<SsoOutcome> {
        if !self.metadata.is_valid_entity(sp_entity_id) {
            return Err(SsoError::UntrustedIssuer(sp_entity_id.to_string()));
        }

        tracing::info!(sp_entity_id = %sp_entity_id, "IdP-initiated SSO");
        self.send_assertion(None, sp_entity_id, subject).await
    }

    async fn park(&self, request: AuthnRequest) -> SsoResult<SsoOutcome> {
        let request_id = request.id.clone();
        let mut transaction =
            SsoTransaction::with_ttl(request, i64::from(self.config.transaction_ttl_secs));
        transaction.state = SsoState::AwaitingReauth;

        self.transactions.park(transaction).await?;

        tracing::info!(
            request_id = %request_id,
            "transaction parked awaiting re-authentication"
        );
        Ok(SsoOutcome::PendingReauth { request_id })
    }

    async fn respond(
        &self,
        request: &AuthnRequest,
        subject: &AuthenticatedSubject,
    ) -> SsoResult<SsoOutcome> {
        self.send_assertion(Some(request), &request.issuer, subject)
            .await
    }

    async fn send_assertion(
        &self,
        request: Option<&AuthnRequest>,
        sp_entity_id: &str,
        subject: &AuthenticatedSubject,
    ) -> SsoResult<SsoOutcome> {
        let entity = self
            .metadata
            .entity_descriptor(sp_entity_id)
            .ok_or_else(|| SsoError::UntrustedIssuer(sp_entity_id.to_string()))?;

        let endpoint = EndpointResolver::resolve(
            entity,
            EndpointCategory::AssertionConsumerService,
            &self.config.supported_bindings,
            &EndpointOverrides::default(),
        )?;

        let assertion = self.builder.build(request, &endpoint, subject, sp_entity_id);

        self.bindings.dispatch(&endpoint, &assertion).await?;

        tracing::info!(
            sp_entity_id = %sp_entity_id,
            destination = %endpoint.location,
            "SSO response dispatched"
        );

        Ok(SsoOutcome::Sent {
            request_id: request.map(|r| r.id.clone()),
            destination: endpoint.location,
            binding: endpoint.binding,
        })
    }
}
