//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; regenerate with
//! `diesel print-schema` after a migration changes the schema.

diesel::table! {
    /// Registered accounts, both claimants and administrators.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Salted password digest.
        password_hash -> Varchar,
        /// Display name.
        full_name -> Varchar,
        /// Contact e-mail address.
        email -> Varchar,
        /// Contact phone number.
        phone -> Varchar,
        /// Account role, `USER` or `ADMIN`.
        role -> Varchar,
        /// Whether the account may log in.
        enabled -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Disaster-relief claims.
    claims (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user account.
        owner_id -> Uuid,
        /// Disaster category, e.g. `Flood`.
        disaster_type -> Varchar,
        /// Date the incident occurred.
        incident_date -> Date,
        /// Where the incident occurred.
        location -> Varchar,
        /// Free-text damage description.
        description -> Text,
        /// Requested amount in whole cents.
        request_amount_cents -> Int8,
        /// Lifecycle state, e.g. `PENDING` or `APPROVED`.
        status -> Varchar,
        /// Administrator reviewing the claim, once review has started.
        reviewer_id -> Nullable<Uuid>,
        /// Reviewer comments recorded with the decision.
        review_comments -> Nullable<Text>,
        /// Awarded amount in whole cents, set on approval.
        approved_amount_cents -> Nullable<Int8>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
        /// When the approve/reject decision was recorded.
        reviewed_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(claims -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(claims, users);
