//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer, never exposed to the
//! domain. Role and status columns are stored as text and re-validated when
//! rows are converted back into domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{claims, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub role: &'a str,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for overwriting existing user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub role: &'a str,
    pub enabled: bool,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the claims table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = claims)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ClaimRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub disaster_type: String,
    pub incident_date: chrono::NaiveDate,
    pub location: String,
    pub description: String,
    pub request_amount_cents: i64,
    pub status: String,
    pub reviewer_id: Option<Uuid>,
    pub review_comments: Option<String>,
    pub approved_amount_cents: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Insertable struct for creating new claim records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = claims)]
pub(crate) struct NewClaimRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub disaster_type: &'a str,
    pub incident_date: chrono::NaiveDate,
    pub location: &'a str,
    pub description: &'a str,
    pub request_amount_cents: i64,
    pub status: &'a str,
    pub reviewer_id: Option<Uuid>,
    pub review_comments: Option<&'a str>,
    pub approved_amount_cents: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Changeset struct for saving the full mutable state of a claim.
///
/// `treat_none_as_null` is required so clearing an optional column, such as
/// `review_comments`, actually writes NULL instead of skipping the field.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = claims)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ClaimUpdate<'a> {
    pub disaster_type: &'a str,
    pub incident_date: chrono::NaiveDate,
    pub location: &'a str,
    pub description: &'a str,
    pub request_amount_cents: i64,
    pub status: &'a str,
    pub reviewer_id: Option<Uuid>,
    pub review_comments: Option<&'a str>,
    pub approved_amount_cents: Option<i64>,
    pub updated_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}
