//! Driven port for durable claim storage.
//!
//! Every engine mutation is a single-record read-modify-write through this
//! port; the store's per-record atomicity is the only transactional
//! guarantee the engine relies on.

use async_trait::async_trait;

use crate::domain::claim::{Claim, ClaimId, ClaimStatus};
use crate::domain::user::UserId;

/// Failures surfaced by a claim repository implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimPersistenceError {
    /// The backing store could not be reached.
    #[error("claim store connection failed: {message}")]
    Connection {
        /// Human-readable description of the failure.
        message: String,
    },
    /// The store rejected or failed the operation.
    #[error("claim store query failed: {message}")]
    Query {
        /// Human-readable description of the failure.
        message: String,
    },
}

impl ClaimPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Durable claim storage with the lookups the engine needs.
#[async_trait]
pub trait ClaimRepository: Send + Sync {
    /// Persist a newly created claim.
    async fn insert(&self, claim: &Claim) -> Result<(), ClaimPersistenceError>;

    /// Persist the current state of an existing claim.
    async fn save(&self, claim: &Claim) -> Result<(), ClaimPersistenceError>;

    /// Remove a claim permanently. Returns whether a record existed.
    async fn delete(&self, id: &ClaimId) -> Result<bool, ClaimPersistenceError>;

    /// Look up a claim by id.
    async fn find_by_id(&self, id: &ClaimId) -> Result<Option<Claim>, ClaimPersistenceError>;

    /// All claims in store-native order.
    async fn list_all(&self) -> Result<Vec<Claim>, ClaimPersistenceError>;

    /// A user's claims, newest first by creation time.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Claim>, ClaimPersistenceError>;

    /// Claims currently in the given status.
    async fn list_by_status(
        &self,
        status: ClaimStatus,
    ) -> Result<Vec<Claim>, ClaimPersistenceError>;

    /// Unconditional claim count.
    async fn count_all(&self) -> Result<u64, ClaimPersistenceError>;

    /// Count of claims in the given status.
    async fn count_by_status(&self, status: ClaimStatus) -> Result<u64, ClaimPersistenceError>;
}
