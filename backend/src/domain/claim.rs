//! Claim aggregate and its value objects.
//!
//! The claim record carries the full review lifecycle: who filed it, what
//! was requested, and how an administrator resolved it. State transitions
//! are applied exclusively by the claim engine; this module only defines
//! the shapes and their construction-time validation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::user::UserId;

/// Unique claim identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClaimId(Uuid);

impl ClaimId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failure raised by [`Amount::from_cents`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// Monetary amounts must not be negative.
    #[error("amount must not be negative")]
    Negative,
}

/// Monetary amount in whole cents.
///
/// ## Invariants
/// - never negative; the constructor rejects values below zero so a claim
///   can never request or be awarded a negative sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Construct an amount from a cent count.
    pub const fn from_cents(cents: i64) -> Result<Self, AmountError> {
        if cents < 0 {
            return Err(AmountError::Negative);
        }
        Ok(Self(cents))
    }

    /// The amount as whole cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a claim.
///
/// Transitions are enforced by the claim engine:
/// Pending → UnderReview → {Approved, Rejected}; Approved → Paid. Rejected
/// and Paid are terminal. Administrators may approve or reject directly
/// from Pending without passing through UnderReview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimStatus {
    /// Submitted and awaiting triage.
    Pending,
    /// An administrator has started the review.
    UnderReview,
    /// Approved for payment, with an awarded amount.
    Approved,
    /// Rejected with reviewer comments. Terminal.
    Rejected,
    /// Payment completed. Terminal.
    Paid,
}

impl ClaimStatus {
    /// Wire and storage name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::UnderReview => "UNDER_REVIEW",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Paid => "PAID",
        }
    }

    /// Whether the claim can still move to another state via the review
    /// operations.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Paid)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a status name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised claim status: {0}")]
pub struct ParseClaimStatusError(pub String);

impl FromStr for ClaimStatus {
    type Err = ParseClaimStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "UNDER_REVIEW" => Ok(Self::UnderReview),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "PAID" => Ok(Self::Paid),
            other => Err(ParseClaimStatusError(other.to_owned())),
        }
    }
}

/// A disaster-relief claim.
///
/// ## Invariants
/// - exactly one owning user (`owner_id`); `reviewer_id`, when set,
///   references an administrator account.
/// - `approved_amount` is set only when `status` is Approved or Paid.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    /// Immutable identifier.
    pub id: ClaimId,
    /// Owning user; the only account allowed to update or delete the claim.
    pub owner_id: UserId,
    /// Category of disaster, e.g. "Flood".
    pub disaster_type: String,
    /// Date the incident occurred.
    pub incident_date: NaiveDate,
    /// Where the incident occurred.
    pub location: String,
    /// Free-text description of the damage.
    pub description: String,
    /// Amount requested by the claimant.
    pub request_amount: Amount,
    /// Current lifecycle state.
    pub status: ClaimStatus,
    /// Administrator who reviewed the claim, once review has started.
    pub reviewer_id: Option<UserId>,
    /// Reviewer's comments recorded on approval or rejection.
    pub review_comments: Option<String>,
    /// Awarded amount, set on approval.
    pub approved_amount: Option<Amount>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// When the approve/reject decision was recorded.
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Validation failure raised by [`ClaimDraft::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClaimDraftError {
    /// Disaster type was missing or blank once trimmed.
    #[error("disaster type must not be empty")]
    EmptyDisasterType,
    /// Location was missing or blank once trimmed.
    #[error("location must not be empty")]
    EmptyLocation,
}

/// Validated input for creating a new claim.
///
/// Structural constraints the boundary already enforces are re-checked here
/// so the engine never persists a blank disaster type or location, and the
/// [`Amount`] type makes a negative request unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimDraft {
    disaster_type: String,
    incident_date: NaiveDate,
    location: String,
    description: String,
    request_amount: Amount,
    status: Option<ClaimStatus>,
}

impl ClaimDraft {
    /// Construct a draft, trimming and validating the text fields.
    pub fn new(
        disaster_type: &str,
        incident_date: NaiveDate,
        location: &str,
        description: impl Into<String>,
        request_amount: Amount,
    ) -> Result<Self, ClaimDraftError> {
        let disaster_type = disaster_type.trim();
        if disaster_type.is_empty() {
            return Err(ClaimDraftError::EmptyDisasterType);
        }
        let location = location.trim();
        if location.is_empty() {
            return Err(ClaimDraftError::EmptyLocation);
        }
        Ok(Self {
            disaster_type: disaster_type.to_owned(),
            incident_date,
            location: location.to_owned(),
            description: description.into(),
            request_amount,
            status: None,
        })
    }

    /// Carry an explicit initial status instead of defaulting to Pending.
    #[must_use]
    pub const fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Materialise the draft into a claim owned by `owner_id`.
    ///
    /// The status falls back to [`ClaimStatus::Pending`] when the draft
    /// carries none, and both audit timestamps start at `now`.
    #[must_use]
    pub fn into_claim(self, owner_id: UserId, now: DateTime<Utc>) -> Claim {
        Claim {
            id: ClaimId::generate(),
            owner_id,
            disaster_type: self.disaster_type,
            incident_date: self.incident_date,
            location: self.location,
            description: self.description,
            request_amount: self.request_amount,
            status: self.status.unwrap_or(ClaimStatus::Pending),
            reviewer_id: None,
            review_comments: None,
            approved_amount: None,
            created_at: now,
            updated_at: now,
            reviewed_at: None,
        }
    }
}

/// Partial update applied to a Pending claim.
///
/// Absent fields retain their prior value. Text fields present in the patch
/// go through the same blank checks as a fresh draft.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimPatch {
    /// Replacement disaster type, if any.
    pub disaster_type: Option<String>,
    /// Replacement incident date, if any.
    pub incident_date: Option<NaiveDate>,
    /// Replacement location, if any.
    pub location: Option<String>,
    /// Replacement description, if any.
    pub description: Option<String>,
    /// Replacement requested amount, if any.
    pub request_amount: Option<Amount>,
}

impl ClaimPatch {
    /// Apply the present fields to `claim`, leaving the rest untouched.
    pub(crate) fn apply(self, claim: &mut Claim) {
        if let Some(disaster_type) = self.disaster_type {
            claim.disaster_type = disaster_type;
        }
        if let Some(incident_date) = self.incident_date {
            claim.incident_date = incident_date;
        }
        if let Some(location) = self.location {
            claim.location = location;
        }
        if let Some(description) = self.description {
            claim.description = description;
        }
        if let Some(request_amount) = self.request_amount {
            claim.request_amount = request_amount;
        }
    }
}
