//! Shared validation helpers for inbound HTTP adapters.

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Amount, ClaimId, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidDate,
    NegativeAmount,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::NegativeAmount => "negative_amount",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn value_error(field: FieldName, message: String, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Require `value` to contain non-whitespace text.
pub(crate) fn require_text(value: &str, field: FieldName) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        let name = field.as_str();
        return Err(field_error(
            field,
            format!("{name} must not be empty"),
            ErrorCode::MissingField,
        ));
    }
    Ok(trimmed.to_owned())
}

/// Parse a claim identifier from a path segment.
pub(crate) fn parse_claim_id(value: &str, field: FieldName) -> Result<ClaimId, Error> {
    Uuid::parse_str(value).map(ClaimId::from_uuid).map_err(|_| {
        let name = field.as_str();
        value_error(
            field,
            format!("{name} must be a valid UUID"),
            ErrorCode::InvalidUuid,
            value,
        )
    })
}

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
pub(crate) fn parse_incident_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    value.parse::<NaiveDate>().map_err(|_| {
        let name = field.as_str();
        value_error(
            field,
            format!("{name} must be a YYYY-MM-DD date"),
            ErrorCode::InvalidDate,
            value,
        )
    })
}

/// Parse a monetary amount given in whole cents.
pub(crate) fn parse_amount_cents(cents: i64, field: FieldName) -> Result<Amount, Error> {
    Amount::from_cents(cents).map_err(|_| {
        let name = field.as_str();
        value_error(
            field,
            format!("{name} must not be negative"),
            ErrorCode::NegativeAmount,
            &cents.to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn require_text_trims_and_accepts() {
        let value = require_text("  Albany  ", FieldName::new("location")).expect("valid text");
        assert_eq!(value, "Albany");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn require_text_rejects_blank_input(#[case] raw: &str) {
        let err = require_text(raw, FieldName::new("location")).expect_err("blank rejected");
        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details["field"], json!("location"));
        assert_eq!(details["code"], json!("missing_field"));
    }

    #[rstest]
    fn parse_claim_id_rejects_garbage() {
        let err = parse_claim_id("not-a-uuid", FieldName::new("id")).expect_err("rejected");
        let details = err.details().expect("details present");
        assert_eq!(details["code"], json!("invalid_uuid"));
        assert_eq!(details["value"], json!("not-a-uuid"));
    }

    #[rstest]
    fn parse_incident_date_accepts_iso_dates() {
        let date =
            parse_incident_date("2025-03-14", FieldName::new("incidentDate")).expect("valid date");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 14).expect("date"));
    }

    #[rstest]
    #[case("14/03/2025")]
    #[case("2025-13-01")]
    #[case("yesterday")]
    fn parse_incident_date_rejects_other_formats(#[case] raw: &str) {
        let err = parse_incident_date(raw, FieldName::new("incidentDate")).expect_err("rejected");
        let details = err.details().expect("details present");
        assert_eq!(details["code"], json!("invalid_date"));
    }

    #[rstest]
    fn parse_amount_cents_rejects_negative_values() {
        let err =
            parse_amount_cents(-500, FieldName::new("requestAmountCents")).expect_err("rejected");
        let details = err.details().expect("details present");
        assert_eq!(details["code"], json!("negative_amount"));
        assert_eq!(details["value"], json!("-500"));
    }
}
