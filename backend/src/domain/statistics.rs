//! Aggregated claim counts for the admin dashboard.

use serde::Serialize;
use utoipa::ToSchema;

/// Per-status claim counts plus the unconditional total.
///
/// All six fields are always present; a status with no claims reports zero.
/// `total` is the count of every claim currently in the store, so the
/// per-status counts always sum to at most `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimStatistics {
    /// Count of all claims regardless of status.
    pub total: u64,
    /// Claims awaiting triage.
    pub pending: u64,
    /// Claims currently being reviewed.
    pub under_review: u64,
    /// Approved claims awaiting payment.
    pub approved: u64,
    /// Rejected claims.
    pub rejected: u64,
    /// Paid claims.
    pub paid: u64,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn serializes_all_six_keys_with_zero_defaults() {
        let value = serde_json::to_value(ClaimStatistics::default()).expect("serializable");
        assert_eq!(
            value,
            json!({
                "total": 0,
                "pending": 0,
                "underReview": 0,
                "approved": 0,
                "rejected": 0,
                "paid": 0,
            })
        );
    }
}
