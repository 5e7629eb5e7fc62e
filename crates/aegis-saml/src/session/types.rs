//! Transaction state for in-flight SSO exchanges.

use crate::saml::AuthnRequest;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Default TTL for parked transactions (5 minutes).
pub const DEFAULT_TRANSACTION_TTL_SECONDS: i64 = 300;

/// Grace period for clock skew (30 seconds).
pub const CLOCK_SKEW_GRACE_SECONDS: i64 = 30;

/// State machine positions of one SSO exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SsoState {
    Received,
    Validated,
    AwaitingReauth,
    ReadyToRespond,
    /// Terminal: response handed to the transport binding.
    Sent,
    /// Terminal: no response was or will be sent.
    Failed,
}

/// One in-flight SSO exchange. Exactly one exists per request id;
/// created on receipt of a validated request and destroyed once the
/// response is dispatched or the transaction fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsoTransaction {
    /// Unique identifier for this transaction record.
    pub id: Uuid,
    /// The pending request, consumed exactly once.
    pub request: AuthnRequest,
    /// Whether the SP demanded a fresh authentication.
    pub force_authn: bool,
    pub state: SsoState,
    pub created_at: DateTime<Utc>,
    /// When a parked continuation stops being resumable.
    pub expires_at: DateTime<Utc>,
    /// When this transaction was resumed (`None` = still parked).
    pub consumed_at: Option<DateTime<Utc>>,
}

impl SsoTransaction {
    /// Create a transaction for a validated request with the default
    /// TTL.
    #[must_use]
    pub fn new(request: AuthnRequest) -> Self {
        Self::with_ttl(request, DEFAULT_TRANSACTION_TTL_SECONDS)
    }

    /// Create a transaction with a custom park TTL.
    #[must_use]
    pub fn with_ttl(request: AuthnRequest, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            force_authn: request.force_authn,
            request,
            state: SsoState::Validated,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_seconds),
            consumed_at: None,
        }
    }

    /// Whether the continuation has expired, with a grace period for
    /// clock skew.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at + Duration::seconds(CLOCK_SKEW_GRACE_SECONDS)
    }

    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.consumed_at.is_some()
    }

    /// Mark this transaction as resumed.
    pub fn consume(&mut self) {
        self.consumed_at = Some(Utc::now());
    }

    /// Validate that this continuation may still be resumed.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.is_expired() {
            return Err(TransactionError::Expired {
                request_id: self.request.id.clone(),
                expired_at: self.expires_at,
            });
        }
        if let Some(consumed_at) = self.consumed_at {
            return Err(TransactionError::AlreadyConsumed {
                request_id: self.request.id.clone(),
                consumed_at,
            });
        }
        Ok(())
    }
}

/// Errors from the parked-transaction table.
#[derive(Debug, Error, Clone)]
pub enum TransactionError {
    /// Request id has no parked continuation.
    #[error("No pending transaction for request {0}")]
    NotFound(String),

    /// Continuation past its TTL plus grace period.
    #[error("Transaction for request {request_id} expired at {expired_at}")]
    Expired {
        request_id: String,
        expired_at: DateTime<Utc>,
    },

    /// Continuation was already resumed once.
    #[error("Transaction for request {request_id} was already resumed at {consumed_at}")]
    AlreadyConsumed {
        request_id: String,
        consumed_at: DateTime<Utc>,
    },

    /// A transaction for this request id is already in flight.
    #[error("Duplicate request id: {0}")]
    DuplicateRequestId(String),

    /// Backing-store failure.
    #[error("Transaction storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: &str) -> AuthnRequest {
        AuthnRequest {
            issuer: "https://sp.example.com".to_string(),
            id: id.to_string(),
            force_authn: true,
            requested_authn_context: None,
        }
    }

    #[test]
    fn new_transaction_is_resumable() {
        let txn = SsoTransaction::new(request("req-1"));
        assert!(!txn.is_expired());
        assert!(!txn.is_consumed());
        assert!(txn.force_authn);
        assert!(txn.validate().is_ok());
        let expected_expiry = txn.created_at + Duration::seconds(DEFAULT_TRANSACTION_TTL_SECONDS);
        assert_eq!(txn.expires_at, expected_expiry);
    }

    #[test]
    fn expired_transaction_fails_validation() {
        let mut txn = SsoTransaction::new(request("req-1"));
        txn.expires_at = Utc::now() - Duration::minutes(2);
        assert!(txn.is_expired());
        assert!(matches!(
            txn.validate(),
            Err(TransactionError::Expired { .. })
        ));
    }

    #[test]
    fn consumed_transaction_fails_validation() {
        let mut txn = SsoTransaction::new(request("req-1"));
        txn.consume();
        assert!(matches!(
            txn.validate(),
            Err(TransactionError::AlreadyConsumed { .. })
        ));
    }

    #[test]
    fn expiry_within_grace_period_is_tolerated() {
        let mut txn = SsoTransaction::new(request("req-1"));
        txn.expires_at = Utc::now() - Duration::seconds(15);
        assert!(!txn.is_expired());
    }
}
