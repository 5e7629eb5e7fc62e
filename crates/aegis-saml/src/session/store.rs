//! Continuation table for parked SSO transactions.

use super::types::{SsoTransaction, TransactionError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Concurrent insert/lookup/consume of parked transactions keyed by
/// request id. Parked transactions hold no execution resources; they
/// are plain records until an external signal resumes them.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Park a transaction. Fails if a transaction for the same request
    /// id is already in flight.
    async fn park(&self, transaction: SsoTransaction) -> Result<(), TransactionError>;

    /// Look up a parked transaction without consuming it.
    async fn get(&self, request_id: &str) -> Result<Option<SsoTransaction>, TransactionError>;

    /// Validate and consume a parked transaction atomically.
    ///
    /// Checks TTL and that the continuation was not already resumed,
    /// marks it consumed, and returns it. The record stays in the
    /// table (consumed) so a replayed resume is detected until cleanup.
    async fn consume(&self, request_id: &str) -> Result<SsoTransaction, TransactionError>;

    /// Drop a transaction record outright.
    async fn remove(&self, request_id: &str) -> Result<(), TransactionError>;

    /// Clean up expired records; returns how many were removed.
    async fn cleanup_expired(&self) -> Result<u64, TransactionError>;
}

/// In-memory continuation table.
#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    transactions: RwLock<HashMap<String, SsoTransaction>>,
}

impl InMemoryTransactionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn park(&self, transaction: SsoTransaction) -> Result<(), TransactionError> {
        let key = transaction.request.id.clone();
        let mut transactions = self.transactions.write().await;

        if transactions.contains_key(&key) {
            return Err(TransactionError::DuplicateRequestId(key));
        }

        transactions.insert(key, transaction);
        Ok(())
    }

    async fn get(&self, request_id: &str) -> Result<Option<SsoTransaction>, TransactionError> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(request_id).cloned())
    }

    async fn consume(&self, request_id: &str) -> Result<SsoTransaction, TransactionError> {
        let mut transactions = self.transactions.write().await;

        let transaction = transactions
            .get_mut(request_id)
            .ok_or_else(|| TransactionError::NotFound(request_id.to_string()))?;

        transaction.validate()?;
        transaction.consume();
        let consumed = transaction.clone();

        tracing::info!(request_id = %request_id, "parked SSO transaction consumed");

        Ok(consumed)
    }

    async fn remove(&self, request_id: &str) -> Result<(), TransactionError> {
        let mut transactions = self.transactions.write().await;
        transactions.remove(request_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> Result<u64, TransactionError> {
        let mut transactions = self.transactions.write().await;
        let before = transactions.len();

        transactions.retain(|_, transaction| !transaction.is_expired());

        let removed = (before - transactions.len()) as u64;
        if removed > 0 {
            tracing::debug!(removed = removed, "cleaned up expired SSO transactions");
        }

        Ok(removed)
    }
}
