//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: every
//! claim and auth endpoint, the health probes, the shared error envelope,
//! and the session cookie security scheme. Swagger UI serves the document in
//! debug builds only.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{ClaimStatistics, Error, ErrorCode};
use crate::inbound::http::auth::{LoginRequest, RegisterRequest, UserResponse};
use crate::inbound::http::claims::{
    ApproveBody, ClaimRequestBody, ClaimResponse, ClaimUpdateBody, RejectBody, StatusOverrideBody,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Disaster relief claims API",
        description = "Session-authenticated claim intake, review, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::claims::create_claim,
        crate::inbound::http::claims::list_my_claims,
        crate::inbound::http::claims::list_all_claims,
        crate::inbound::http::claims::list_pending_claims,
        crate::inbound::http::claims::claim_statistics,
        crate::inbound::http::claims::get_claim,
        crate::inbound::http::claims::update_claim,
        crate::inbound::http::claims::delete_claim,
        crate::inbound::http::claims::review_claim,
        crate::inbound::http::claims::approve_claim,
        crate::inbound::http::claims::reject_claim,
        crate::inbound::http::claims::mark_claim_paid,
        crate::inbound::http::claims::override_claim_status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        ClaimStatistics,
        RegisterRequest,
        LoginRequest,
        UserResponse,
        ClaimRequestBody,
        ClaimUpdateBody,
        ApproveBody,
        RejectBody,
        StatusOverrideBody,
        ClaimResponse,
    )),
    tags(
        (name = "auth", description = "Registration, login, and logout"),
        (name = "claims", description = "Claim intake and owner operations"),
        (name = "review", description = "Administrative review state machine"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
