//! Claim engine: lifecycle state machine and authorization policy.
//!
//! This is the one component with real logic. Every operation is a
//! single-record read-modify-write: load the current claim, apply the
//! change, persist. Ownership checks run before state checks so callers
//! learn `Forbidden` rather than a state hint for claims they do not own.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::claim::{Amount, Claim, ClaimDraft, ClaimId, ClaimPatch, ClaimStatus};
use crate::domain::error::Error;
use crate::domain::ports::{
    ClaimPersistenceError, ClaimRepository, ClaimsCommand, ClaimsQuery, UserPersistenceError,
    UserRepository,
};
use crate::domain::statistics::ClaimStatistics;
use crate::domain::user::{User, Username};

/// Claim engine implementing the [`ClaimsCommand`] and [`ClaimsQuery`]
/// driving ports over the two repositories.
#[derive(Clone)]
pub struct ClaimsService<C, U> {
    claims: Arc<C>,
    users: Arc<U>,
}

impl<C, U> ClaimsService<C, U> {
    /// Create a new engine with the given repositories.
    pub const fn new(claims: Arc<C>, users: Arc<U>) -> Self {
        Self { claims, users }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::conflict(format!("username already taken: {username}"))
        }
    }
}

fn map_claim_error(error: ClaimPersistenceError) -> Error {
    match error {
        ClaimPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("claim store unavailable: {message}"))
        }
        ClaimPersistenceError::Query { message } => {
            Error::internal(format!("claim store error: {message}"))
        }
    }
}

fn claim_not_found(id: ClaimId) -> Error {
    Error::not_found("claim not found").with_details(json!({
        "claimId": id.to_string(),
        "code": "claim_not_found",
    }))
}

fn not_owner() -> Error {
    Error::forbidden("only the claim owner may access this claim")
}

fn wrong_state(required: ClaimStatus, actual: ClaimStatus, action: &str) -> Error {
    Error::conflict(format!("only {required} claims can be {action}")).with_details(json!({
        "status": actual.as_str(),
        "code": "invalid_claim_state",
    }))
}

fn validate_patch(patch: &ClaimPatch) -> Result<(), Error> {
    let blank_field = [
        ("disasterType", patch.disaster_type.as_deref()),
        ("location", patch.location.as_deref()),
    ]
    .into_iter()
    .find(|(_, value)| value.is_some_and(|v| v.trim().is_empty()));

    match blank_field {
        Some((field, _)) => Err(Error::invalid_request(format!(
            "{field} must not be empty"
        ))
        .with_details(json!({ "field": field, "code": "empty_field" }))),
        None => Ok(()),
    }
}

impl<C, U> ClaimsService<C, U>
where
    C: ClaimRepository,
    U: UserRepository,
{
    async fn resolve_user(&self, username: &Username) -> Result<User, Error> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_error)?;
        user.ok_or_else(|| Error::not_found("user not found"))
    }

    async fn load_claim(&self, id: ClaimId) -> Result<Claim, Error> {
        let claim = self
            .claims
            .find_by_id(&id)
            .await
            .map_err(map_claim_error)?;
        claim.ok_or_else(|| claim_not_found(id))
    }

    /// Load a claim and the admin who is acting on it, in that order, so a
    /// missing claim is reported before a missing reviewer account.
    async fn load_for_review(
        &self,
        id: ClaimId,
        admin: &Username,
    ) -> Result<(Claim, User), Error> {
        let claim = self.load_claim(id).await?;
        let reviewer = self.resolve_user(admin).await?;
        Ok((claim, reviewer))
    }

    /// Load a claim and verify `caller` owns it. Ownership precedes any
    /// state check.
    async fn load_owned(&self, id: ClaimId, caller: &Username) -> Result<Claim, Error> {
        let claim = self.load_claim(id).await?;
        let caller = self.resolve_user(caller).await?;
        if claim.owner_id != caller.id {
            return Err(not_owner());
        }
        Ok(claim)
    }
}

#[async_trait]
impl<C, U> ClaimsCommand for ClaimsService<C, U>
where
    C: ClaimRepository,
    U: UserRepository,
{
    async fn create(&self, draft: ClaimDraft, owner: &Username) -> Result<Claim, Error> {
        let user = self.resolve_user(owner).await?;
        let claim = draft.into_claim(user.id, Utc::now());
        self.claims.insert(&claim).await.map_err(map_claim_error)?;
        info!(claim_id = %claim.id, owner = %owner, "claim created");
        Ok(claim)
    }

    async fn update(
        &self,
        id: ClaimId,
        patch: ClaimPatch,
        caller: &Username,
    ) -> Result<Claim, Error> {
        validate_patch(&patch)?;
        let mut claim = self.load_owned(id, caller).await?;
        if claim.status != ClaimStatus::Pending {
            return Err(wrong_state(ClaimStatus::Pending, claim.status, "updated"));
        }

        patch.apply(&mut claim);
        claim.updated_at = Utc::now();
        self.claims.save(&claim).await.map_err(map_claim_error)?;
        Ok(claim)
    }

    async fn delete(&self, id: ClaimId, caller: &Username) -> Result<(), Error> {
        let claim = self.load_owned(id, caller).await?;
        if claim.status != ClaimStatus::Pending {
            return Err(wrong_state(ClaimStatus::Pending, claim.status, "deleted"));
        }

        let removed = self.claims.delete(&id).await.map_err(map_claim_error)?;
        if !removed {
            return Err(claim_not_found(id));
        }
        info!(claim_id = %id, owner = %caller, "claim deleted");
        Ok(())
    }

    async fn set_under_review(&self, id: ClaimId, admin: &Username) -> Result<Claim, Error> {
        let (mut claim, reviewer) = self.load_for_review(id, admin).await?;
        if claim.status.is_terminal() {
            // Permitted today; flagged so operators can spot reopened claims.
            warn!(claim_id = %id, status = %claim.status, "review started on a terminal claim");
        }

        claim.status = ClaimStatus::UnderReview;
        claim.reviewer_id = Some(reviewer.id);
        claim.updated_at = Utc::now();
        self.claims.save(&claim).await.map_err(map_claim_error)?;
        Ok(claim)
    }

    async fn approve(
        &self,
        id: ClaimId,
        admin: &Username,
        comments: Option<String>,
        amount: Option<Amount>,
    ) -> Result<Claim, Error> {
        let (mut claim, reviewer) = self.load_for_review(id, admin).await?;

        let now = Utc::now();
        claim.status = ClaimStatus::Approved;
        claim.reviewer_id = Some(reviewer.id);
        claim.review_comments = comments;
        claim.approved_amount = Some(amount.unwrap_or(claim.request_amount));
        claim.reviewed_at = Some(now);
        claim.updated_at = now;
        self.claims.save(&claim).await.map_err(map_claim_error)?;
        info!(claim_id = %id, reviewer = %admin, "claim approved");
        Ok(claim)
    }

    async fn reject(
        &self,
        id: ClaimId,
        admin: &Username,
        comments: Option<String>,
    ) -> Result<Claim, Error> {
        let (mut claim, reviewer) = self.load_for_review(id, admin).await?;

        let now = Utc::now();
        claim.status = ClaimStatus::Rejected;
        claim.reviewer_id = Some(reviewer.id);
        claim.review_comments = comments;
        claim.reviewed_at = Some(now);
        claim.updated_at = now;
        self.claims.save(&claim).await.map_err(map_claim_error)?;
        info!(claim_id = %id, reviewer = %admin, "claim rejected");
        Ok(claim)
    }

    async fn mark_paid(&self, id: ClaimId, admin: &Username) -> Result<Claim, Error> {
        let mut claim = self.load_claim(id).await?;
        if claim.status != ClaimStatus::Approved {
            return Err(wrong_state(
                ClaimStatus::Approved,
                claim.status,
                "marked as paid",
            ));
        }

        claim.status = ClaimStatus::Paid;
        claim.updated_at = Utc::now();
        self.claims.save(&claim).await.map_err(map_claim_error)?;
        info!(claim_id = %id, admin = %admin, "claim marked as paid");
        Ok(claim)
    }

    async fn update_status(&self, id: ClaimId, status_name: &str) -> Result<Claim, Error> {
        let status: ClaimStatus = status_name.parse().map_err(|_| {
            Error::invalid_request("unrecognised claim status").with_details(json!({
                "field": "status",
                "value": status_name,
                "code": "invalid_status",
            }))
        })?;

        let mut claim = self.load_claim(id).await?;
        claim.status = status;
        claim.updated_at = Utc::now();
        self.claims.save(&claim).await.map_err(map_claim_error)?;
        Ok(claim)
    }
}

#[async_trait]
impl<C, U> ClaimsQuery for ClaimsService<C, U>
where
    C: ClaimRepository,
    U: UserRepository,
{
    async fn get(&self, id: ClaimId, caller: &Username) -> Result<Claim, Error> {
        let claim = self.load_claim(id).await?;
        let user = self.resolve_user(caller).await?;
        if claim.owner_id != user.id && !user.role.is_admin() {
            return Err(not_owner());
        }
        Ok(claim)
    }

    async fn list_mine(&self, owner: &Username) -> Result<Vec<Claim>, Error> {
        let user = self.resolve_user(owner).await?;
        self.claims
            .list_by_owner(&user.id)
            .await
            .map_err(map_claim_error)
    }

    async fn list_all(&self) -> Result<Vec<Claim>, Error> {
        self.claims.list_all().await.map_err(map_claim_error)
    }

    async fn list_by_status(&self, status: ClaimStatus) -> Result<Vec<Claim>, Error> {
        self.claims
            .list_by_status(status)
            .await
            .map_err(map_claim_error)
    }

    async fn statistics(&self) -> Result<ClaimStatistics, Error> {
        let claims = &self.claims;
        Ok(ClaimStatistics {
            total: claims.count_all().await.map_err(map_claim_error)?,
            pending: claims
                .count_by_status(ClaimStatus::Pending)
                .await
                .map_err(map_claim_error)?,
            under_review: claims
                .count_by_status(ClaimStatus::UnderReview)
                .await
                .map_err(map_claim_error)?,
            approved: claims
                .count_by_status(ClaimStatus::Approved)
                .await
                .map_err(map_claim_error)?,
            rejected: claims
                .count_by_status(ClaimStatus::Rejected)
                .await
                .map_err(map_claim_error)?,
            paid: claims
                .count_by_status(ClaimStatus::Paid)
                .await
                .map_err(map_claim_error)?,
        })
    }
}
