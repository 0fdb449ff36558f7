//! PostgreSQL-backed `ClaimRepository` implementation using Diesel ORM.
//!
//! Persists claims and reconstructs them through validated domain
//! constructors so a corrupted status or negative amount in storage surfaces
//! as a query error instead of an invalid domain value.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::claim::{Amount, Claim, ClaimId, ClaimStatus};
use crate::domain::ports::{ClaimPersistenceError, ClaimRepository};
use crate::domain::user::UserId;

use super::diesel_error_mapping;
use super::models::{ClaimRow, ClaimUpdate, NewClaimRow};
use super::pool::{DbPool, PoolError};
use super::schema::claims;

/// Diesel-backed implementation of the claim repository port.
#[derive(Clone)]
pub struct DieselClaimRepository {
    pool: DbPool,
}

impl DieselClaimRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ClaimPersistenceError {
    diesel_error_mapping::map_pool_error(error, ClaimPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ClaimPersistenceError {
    diesel_error_mapping::map_diesel_error(
        error,
        ClaimPersistenceError::query,
        ClaimPersistenceError::connection,
    )
}

fn decode_amount(cents: i64, column: &str) -> Result<Amount, ClaimPersistenceError> {
    Amount::from_cents(cents)
        .map_err(|err| ClaimPersistenceError::query(format!("invalid stored {column}: {err}")))
}

/// Convert a database row into a validated domain claim.
fn row_to_claim(row: ClaimRow) -> Result<Claim, ClaimPersistenceError> {
    let status = row
        .status
        .parse::<ClaimStatus>()
        .map_err(|err| ClaimPersistenceError::query(format!("invalid stored status: {err}")))?;
    let request_amount = decode_amount(row.request_amount_cents, "request amount")?;
    let approved_amount = row
        .approved_amount_cents
        .map(|cents| decode_amount(cents, "approved amount"))
        .transpose()?;

    Ok(Claim {
        id: ClaimId::from_uuid(row.id),
        owner_id: UserId::from_uuid(row.owner_id),
        disaster_type: row.disaster_type,
        incident_date: row.incident_date,
        location: row.location,
        description: row.description,
        request_amount,
        status,
        reviewer_id: row.reviewer_id.map(UserId::from_uuid),
        review_comments: row.review_comments,
        approved_amount,
        created_at: row.created_at,
        updated_at: row.updated_at,
        reviewed_at: row.reviewed_at,
    })
}

fn rows_to_claims(rows: Vec<ClaimRow>) -> Result<Vec<Claim>, ClaimPersistenceError> {
    rows.into_iter().map(row_to_claim).collect()
}

#[async_trait]
impl ClaimRepository for DieselClaimRepository {
    async fn insert(&self, claim: &Claim) -> Result<(), ClaimPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewClaimRow {
            id: *claim.id.as_uuid(),
            owner_id: *claim.owner_id.as_uuid(),
            disaster_type: &claim.disaster_type,
            incident_date: claim.incident_date,
            location: &claim.location,
            description: &claim.description,
            request_amount_cents: claim.request_amount.cents(),
            status: claim.status.as_str(),
            reviewer_id: claim.reviewer_id.as_ref().map(|id| *id.as_uuid()),
            review_comments: claim.review_comments.as_deref(),
            approved_amount_cents: claim.approved_amount.map(Amount::cents),
            created_at: claim.created_at,
            updated_at: claim.updated_at,
            reviewed_at: claim.reviewed_at,
        };

        diesel::insert_into(claims::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn save(&self, claim: &Claim) -> Result<(), ClaimPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = ClaimUpdate {
            disaster_type: &claim.disaster_type,
            incident_date: claim.incident_date,
            location: &claim.location,
            description: &claim.description,
            request_amount_cents: claim.request_amount.cents(),
            status: claim.status.as_str(),
            reviewer_id: claim.reviewer_id.as_ref().map(|id| *id.as_uuid()),
            review_comments: claim.review_comments.as_deref(),
            approved_amount_cents: claim.approved_amount.map(Amount::cents),
            updated_at: claim.updated_at,
            reviewed_at: claim.reviewed_at,
        };

        let updated = diesel::update(claims::table.filter(claims::id.eq(claim.id.as_uuid())))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(ClaimPersistenceError::query("claim missing on save"));
        }
        Ok(())
    }

    async fn delete(&self, id: &ClaimId) -> Result<bool, ClaimPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(claims::table.filter(claims::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn find_by_id(&self, id: &ClaimId) -> Result<Option<Claim>, ClaimPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = claims::table
            .filter(claims::id.eq(id.as_uuid()))
            .select(ClaimRow::as_select())
            .first::<ClaimRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_claim).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Claim>, ClaimPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = claims::table
            .order(claims::created_at.desc())
            .select(ClaimRow::as_select())
            .load::<ClaimRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_claims(rows)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Claim>, ClaimPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = claims::table
            .filter(claims::owner_id.eq(owner.as_uuid()))
            .order(claims::created_at.desc())
            .select(ClaimRow::as_select())
            .load::<ClaimRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_claims(rows)
    }

    async fn list_by_status(
        &self,
        status: ClaimStatus,
    ) -> Result<Vec<Claim>, ClaimPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = claims::table
            .filter(claims::status.eq(status.as_str()))
            .order(claims::created_at.desc())
            .select(ClaimRow::as_select())
            .load::<ClaimRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_claims(rows)
    }

    async fn count_all(&self) -> Result<u64, ClaimPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = claims::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(count.unsigned_abs())
    }

    async fn count_by_status(
        &self,
        status: ClaimStatus,
    ) -> Result<u64, ClaimPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = claims::table
            .filter(claims::status.eq(status.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(count.unsigned_abs())
    }
}
