//! Driving ports for the claim engine.
//!
//! In hexagonal terms these are *driving* ports: inbound adapters call them
//! to run claim use-cases without knowing the backing infrastructure, which
//! keeps HTTP handler tests deterministic because they can substitute a
//! test double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::claim::{Amount, Claim, ClaimDraft, ClaimId, ClaimPatch, ClaimStatus};
use crate::domain::error::Error;
use crate::domain::statistics::ClaimStatistics;
use crate::domain::user::Username;

/// Mutating claim use-cases: submission, owner edits, and the review
/// state machine.
#[async_trait]
pub trait ClaimsCommand: Send + Sync {
    /// Submit a new claim owned by `owner`.
    async fn create(&self, draft: ClaimDraft, owner: &Username) -> Result<Claim, Error>;

    /// Apply a partial update to a Pending claim owned by `caller`.
    ///
    /// The ownership check runs before the state check, so a non-owner is
    /// told `Forbidden` even when the claim is no longer Pending.
    async fn update(
        &self,
        id: ClaimId,
        patch: ClaimPatch,
        caller: &Username,
    ) -> Result<Claim, Error>;

    /// Permanently delete a Pending claim owned by `caller`.
    async fn delete(&self, id: ClaimId, caller: &Username) -> Result<(), Error>;

    /// Move a claim into review, recording `admin` as the reviewer.
    async fn set_under_review(&self, id: ClaimId, admin: &Username) -> Result<Claim, Error>;

    /// Approve a claim. When `amount` is absent the awarded amount defaults
    /// to the claim's requested amount.
    async fn approve(
        &self,
        id: ClaimId,
        admin: &Username,
        comments: Option<String>,
        amount: Option<Amount>,
    ) -> Result<Claim, Error>;

    /// Reject a claim with reviewer comments.
    async fn reject(
        &self,
        id: ClaimId,
        admin: &Username,
        comments: Option<String>,
    ) -> Result<Claim, Error>;

    /// Mark an Approved claim as Paid.
    async fn mark_paid(&self, id: ClaimId, admin: &Username) -> Result<Claim, Error>;

    /// Force-set a claim's status by wire name, bypassing transition and
    /// authorization checks. Administrative override.
    async fn update_status(&self, id: ClaimId, status_name: &str) -> Result<Claim, Error>;
}

/// Read-only claim use-cases.
#[async_trait]
pub trait ClaimsQuery: Send + Sync {
    /// Fetch a single claim, visible to its owner and to administrators.
    async fn get(&self, id: ClaimId, caller: &Username) -> Result<Claim, Error>;

    /// The caller's own claims, newest first.
    async fn list_mine(&self, owner: &Username) -> Result<Vec<Claim>, Error>;

    /// Every claim in the store.
    async fn list_all(&self) -> Result<Vec<Claim>, Error>;

    /// Claims currently in the given status.
    async fn list_by_status(&self, status: ClaimStatus) -> Result<Vec<Claim>, Error>;

    /// Aggregated per-status counts.
    async fn statistics(&self) -> Result<ClaimStatistics, Error>;
}
