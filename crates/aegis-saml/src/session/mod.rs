//! Parked-transaction state for the forced re-authentication flow.
//!
//! A transaction that cannot be answered immediately is stored here as
//! an explicit continuation record keyed by request id, not as a
//! suspended call stack. An external re-authentication-complete signal
//! consumes the record and resumes the exchange.

pub mod store;
pub mod types;

pub use store::{InMemoryTransactionStore, TransactionStore};
pub use types::{
    SsoState, SsoTransaction, TransactionError, CLOCK_SKEW_GRACE_SECONDS,
    DEFAULT_TRANSACTION_TTL_SECONDS,
};
