//! Claim HTTP handlers.
//!
//! ```text
//! POST   /api/claims
//! GET    /api/claims/my-claims
//! GET    /api/claims/all
//! GET    /api/claims/pending
//! GET    /api/claims/statistics
//! GET    /api/claims/{id}
//! PUT    /api/claims/{id}
//! DELETE /api/claims/{id}
//! POST   /api/claims/{id}/review
//! POST   /api/claims/{id}/approve
//! POST   /api/claims/{id}/reject
//! POST   /api/claims/{id}/paid
//! PUT    /api/claims/{id}/status
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Amount, Claim, ClaimDraft, ClaimId, ClaimPatch, ClaimStatistics, ClaimStatus, Error,
};
use crate::inbound::http::guards::require_admin;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    parse_amount_cents, parse_claim_id, parse_incident_date, require_text, FieldName,
};
use crate::inbound::http::ApiResult;

/// Request payload for submitting a claim.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequestBody {
    pub disaster_type: String,
    /// ISO 8601 calendar date, `YYYY-MM-DD`.
    #[schema(format = "date", example = "2025-03-14")]
    pub incident_date: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    /// Requested amount in whole cents.
    #[schema(example = 500000)]
    pub request_amount_cents: i64,
}

/// Request payload for partially updating a Pending claim.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimUpdateBody {
    pub disaster_type: Option<String>,
    #[schema(format = "date")]
    pub incident_date: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub request_amount_cents: Option<i64>,
}

/// Request payload for approving a claim.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApproveBody {
    pub comments: Option<String>,
    /// Awarded amount in whole cents; defaults to the requested amount.
    pub approved_amount_cents: Option<i64>,
}

/// Request payload for rejecting a claim.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RejectBody {
    pub comments: Option<String>,
}

/// Request payload for the administrative status override.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusOverrideBody {
    #[schema(example = "UNDER_REVIEW")]
    pub status: String,
}

/// Claim payload returned by every claim endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub owner_id: String,
    pub disaster_type: String,
    #[schema(format = "date")]
    pub incident_date: String,
    pub location: String,
    pub description: String,
    pub request_amount_cents: i64,
    #[schema(example = "PENDING")]
    pub status: String,
    #[schema(format = "uuid")]
    pub reviewer_id: Option<String>,
    pub review_comments: Option<String>,
    pub approved_amount_cents: Option<i64>,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
    #[schema(format = "date-time")]
    pub reviewed_at: Option<String>,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            id: claim.id.as_uuid().to_string(),
            owner_id: claim.owner_id.as_uuid().to_string(),
            disaster_type: claim.disaster_type,
            incident_date: claim.incident_date.to_string(),
            location: claim.location,
            description: claim.description,
            request_amount_cents: claim.request_amount.cents(),
            status: claim.status.as_str().to_owned(),
            reviewer_id: claim.reviewer_id.map(|id| id.as_uuid().to_string()),
            review_comments: claim.review_comments,
            approved_amount_cents: claim.approved_amount.map(Amount::cents),
            created_at: claim.created_at.to_rfc3339(),
            updated_at: claim.updated_at.to_rfc3339(),
            reviewed_at: claim.reviewed_at.map(|at| at.to_rfc3339()),
        }
    }
}

fn claims_json(claims: Vec<Claim>) -> web::Json<Vec<ClaimResponse>> {
    web::Json(claims.into_iter().map(ClaimResponse::from).collect())
}

fn parse_draft(body: ClaimRequestBody) -> Result<ClaimDraft, Error> {
    let disaster_type = require_text(&body.disaster_type, FieldName::new("disasterType"))?;
    let incident_date = parse_incident_date(&body.incident_date, FieldName::new("incidentDate"))?;
    let location = require_text(&body.location, FieldName::new("location"))?;
    let request_amount =
        parse_amount_cents(body.request_amount_cents, FieldName::new("requestAmountCents"))?;

    ClaimDraft::new(
        &disaster_type,
        incident_date,
        &location,
        &body.description,
        request_amount,
    )
    .map_err(|err| Error::invalid_request(err.to_string()))
}

fn parse_patch(body: ClaimUpdateBody) -> Result<ClaimPatch, Error> {
    Ok(ClaimPatch {
        disaster_type: body
            .disaster_type
            .map(|raw| require_text(&raw, FieldName::new("disasterType")))
            .transpose()?,
        incident_date: body
            .incident_date
            .map(|raw| parse_incident_date(&raw, FieldName::new("incidentDate")))
            .transpose()?,
        location: body
            .location
            .map(|raw| require_text(&raw, FieldName::new("location")))
            .transpose()?,
        description: body.description,
        request_amount: body
            .request_amount_cents
            .map(|cents| parse_amount_cents(cents, FieldName::new("requestAmountCents")))
            .transpose()?,
    })
}

fn claim_id_from_path(path: web::Path<String>) -> Result<ClaimId, Error> {
    parse_claim_id(&path.into_inner(), FieldName::new("id"))
}

fn parse_approved_amount(cents: Option<i64>) -> Result<Option<Amount>, Error> {
    cents
        .map(|cents| parse_amount_cents(cents, FieldName::new("approvedAmountCents")))
        .transpose()
}

/// Submit a new claim owned by the authenticated caller.
#[utoipa::path(
    post,
    path = "/api/claims",
    request_body = ClaimRequestBody,
    responses(
        (status = 201, description = "Claim created", body = ClaimResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["claims"],
    operation_id = "createClaim",
    security(("SessionCookie" = []))
)]
#[post("")]
pub async fn create_claim(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ClaimRequestBody>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_subject()?;
    let draft = parse_draft(payload.into_inner())?;

    let claim = state.claims_command.create(draft, &owner).await?;
    Ok(HttpResponse::Created().json(ClaimResponse::from(claim)))
}

/// The caller's own claims, newest first.
#[utoipa::path(
    get,
    path = "/api/claims/my-claims",
    responses(
        (status = 200, description = "Claims owned by the caller", body = [ClaimResponse]),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["claims"],
    operation_id = "listMyClaims",
    security(("SessionCookie" = []))
)]
#[get("/my-claims")]
pub async fn list_my_claims(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ClaimResponse>>> {
    let owner = session.require_subject()?;
    let claims = state.claims_query.list_mine(&owner).await?;
    Ok(claims_json(claims))
}

/// Every claim in the store. Administrators only.
#[utoipa::path(
    get,
    path = "/api/claims/all",
    responses(
        (status = 200, description = "All claims", body = [ClaimResponse]),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["claims"],
    operation_id = "listAllClaims",
    security(("SessionCookie" = []))
)]
#[get("/all")]
pub async fn list_all_claims(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ClaimResponse>>> {
    require_admin(&state, &session).await?;
    let claims = state.claims_query.list_all().await?;
    Ok(claims_json(claims))
}

/// Claims awaiting review. Administrators only.
#[utoipa::path(
    get,
    path = "/api/claims/pending",
    responses(
        (status = 200, description = "Pending claims", body = [ClaimResponse]),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["claims"],
    operation_id = "listPendingClaims",
    security(("SessionCookie" = []))
)]
#[get("/pending")]
pub async fn list_pending_claims(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ClaimResponse>>> {
    require_admin(&state, &session).await?;
    let claims = state
        .claims_query
        .list_by_status(ClaimStatus::Pending)
        .await?;
    Ok(claims_json(claims))
}

/// Aggregated per-status claim counts. Administrators only.
#[utoipa::path(
    get,
    path = "/api/claims/statistics",
    responses(
        (status = 200, description = "Claim statistics", body = ClaimStatistics),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["claims"],
    operation_id = "claimStatistics",
    security(("SessionCookie" = []))
)]
#[get("/statistics")]
pub async fn claim_statistics(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ClaimStatistics>> {
    require_admin(&state, &session).await?;
    let statistics = state.claims_query.statistics().await?;
    Ok(web::Json(statistics))
}

/// Fetch a single claim, visible to its owner and to administrators.
#[utoipa::path(
    get,
    path = "/api/claims/{id}",
    params(("id" = uuid::Uuid, Path, description = "Claim identifier")),
    responses(
        (status = 200, description = "The claim", body = ClaimResponse),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["claims"],
    operation_id = "getClaim",
    security(("SessionCookie" = []))
)]
#[get("/{id}")]
pub async fn get_claim(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ClaimResponse>> {
    let caller = session.require_subject()?;
    let id = claim_id_from_path(path)?;

    let claim = state.claims_query.get(id, &caller).await?;
    Ok(web::Json(ClaimResponse::from(claim)))
}

/// Update a Pending claim owned by the caller.
#[utoipa::path(
    put,
    path = "/api/claims/{id}",
    params(("id" = uuid::Uuid, Path, description = "Claim identifier")),
    request_body = ClaimUpdateBody,
    responses(
        (status = 200, description = "Updated claim", body = ClaimResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Claim is not pending", body = Error)
    ),
    tags = ["claims"],
    operation_id = "updateClaim",
    security(("SessionCookie" = []))
)]
#[put("/{id}")]
pub async fn update_claim(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ClaimUpdateBody>,
) -> ApiResult<web::Json<ClaimResponse>> {
    let caller = session.require_subject()?;
    let id = claim_id_from_path(path)?;
    let patch = parse_patch(payload.into_inner())?;

    let claim = state.claims_command.update(id, patch, &caller).await?;
    Ok(web::Json(ClaimResponse::from(claim)))
}

/// Permanently delete a Pending claim owned by the caller.
#[utoipa::path(
    delete,
    path = "/api/claims/{id}",
    params(("id" = uuid::Uuid, Path, description = "Claim identifier")),
    responses(
        (status = 204, description = "Claim deleted"),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Claim is not pending", body = Error)
    ),
    tags = ["claims"],
    operation_id = "deleteClaim",
    security(("SessionCookie" = []))
)]
#[delete("/{id}")]
pub async fn delete_claim(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_subject()?;
    let id = claim_id_from_path(path)?;

    state.claims_command.delete(id, &caller).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Move a claim into review, recording the caller as reviewer.
#[utoipa::path(
    post,
    path = "/api/claims/{id}/review",
    params(("id" = uuid::Uuid, Path, description = "Claim identifier")),
    responses(
        (status = 200, description = "Claim under review", body = ClaimResponse),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["review"],
    operation_id = "reviewClaim",
    security(("SessionCookie" = []))
)]
#[post("/{id}/review")]
pub async fn review_claim(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ClaimResponse>> {
    let admin = require_admin(&state, &session).await?;
    let id = claim_id_from_path(path)?;

    let claim = state
        .claims_command
        .set_under_review(id, &admin.username)
        .await?;
    Ok(web::Json(ClaimResponse::from(claim)))
}

/// Approve a claim, optionally overriding the awarded amount.
#[utoipa::path(
    post,
    path = "/api/claims/{id}/approve",
    params(("id" = uuid::Uuid, Path, description = "Claim identifier")),
    request_body = ApproveBody,
    responses(
        (status = 200, description = "Approved claim", body = ClaimResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["review"],
    operation_id = "approveClaim",
    security(("SessionCookie" = []))
)]
#[post("/{id}/approve")]
pub async fn approve_claim(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ApproveBody>,
) -> ApiResult<web::Json<ClaimResponse>> {
    let admin = require_admin(&state, &session).await?;
    let id = claim_id_from_path(path)?;
    let payload = payload.into_inner();
    let amount = parse_approved_amount(payload.approved_amount_cents)?;

    let claim = state
        .claims_command
        .approve(id, &admin.username, payload.comments, amount)
        .await?;
    Ok(web::Json(ClaimResponse::from(claim)))
}

/// Reject a claim with reviewer comments.
#[utoipa::path(
    post,
    path = "/api/claims/{id}/reject",
    params(("id" = uuid::Uuid, Path, description = "Claim identifier")),
    request_body = RejectBody,
    responses(
        (status = 200, description = "Rejected claim", body = ClaimResponse),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["review"],
    operation_id = "rejectClaim",
    security(("SessionCookie" = []))
)]
#[post("/{id}/reject")]
pub async fn reject_claim(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<RejectBody>,
) -> ApiResult<web::Json<ClaimResponse>> {
    let admin = require_admin(&state, &session).await?;
    let id = claim_id_from_path(path)?;

    let claim = state
        .claims_command
        .reject(id, &admin.username, payload.into_inner().comments)
        .await?;
    Ok(web::Json(ClaimResponse::from(claim)))
}

/// Mark an Approved claim as Paid.
#[utoipa::path(
    post,
    path = "/api/claims/{id}/paid",
    params(("id" = uuid::Uuid, Path, description = "Claim identifier")),
    responses(
        (status = 200, description = "Paid claim", body = ClaimResponse),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Claim is not approved", body = Error)
    ),
    tags = ["review"],
    operation_id = "markClaimPaid",
    security(("SessionCookie" = []))
)]
#[post("/{id}/paid")]
pub async fn mark_claim_paid(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ClaimResponse>> {
    let admin = require_admin(&state, &session).await?;
    let id = claim_id_from_path(path)?;

    let claim = state.claims_command.mark_paid(id, &admin.username).await?;
    Ok(web::Json(ClaimResponse::from(claim)))
}

/// Force-set a claim's status. Administrative override.
#[utoipa::path(
    put,
    path = "/api/claims/{id}/status",
    params(("id" = uuid::Uuid, Path, description = "Claim identifier")),
    request_body = StatusOverrideBody,
    responses(
        (status = 200, description = "Claim with forced status", body = ClaimResponse),
        (status = 400, description = "Unknown status name", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["review"],
    operation_id = "overrideClaimStatus",
    security(("SessionCookie" = []))
)]
#[put("/{id}/status")]
pub async fn override_claim_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<StatusOverrideBody>,
) -> ApiResult<web::Json<ClaimResponse>> {
    require_admin(&state, &session).await?;
    let id = claim_id_from_path(path)?;

    let claim = state
        .claims_command
        .update_status(id, &payload.into_inner().status)
        .await?;
    Ok(web::Json(ClaimResponse::from(claim)))
}

/// Register the claim routes on a scope mounted at `/api/claims`.
///
/// Literal segments are registered before the `{id}` routes so
/// `GET /my-claims` never parses as a claim identifier.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_claim)
        .service(list_my_claims)
        .service(list_all_claims)
        .service(list_pending_claims)
        .service(claim_statistics)
        .service(get_claim)
        .service(update_claim)
        .service(delete_claim)
        .service(review_claim)
        .service(approve_claim)
        .service(reject_claim)
        .service(mark_claim_paid)
        .service(override_claim_status);
}

#[cfg(test)]
#[path = "claims_tests.rs"]
mod tests;
