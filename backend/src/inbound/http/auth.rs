//! Authentication HTTP handlers.
//!
//! ```text
//! POST /api/auth/register {"username":"alice","password":"...","fullName":"Alice"}
//! POST /api/auth/login    {"username":"alice","password":"..."}
//! POST /api/auth/logout
//! ```

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{CredentialsError, Error, LoginCredentials, Registration, User};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Registration request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Login request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Account payload returned by authentication endpoints.
///
/// Never includes the stored password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(format = "uuid")]
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[schema(example = "USER")]
    pub role: String,
    pub enabled: bool,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.as_uuid().to_string(),
            username: user.username.as_str().to_owned(),
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            role: user.role.as_str().to_owned(),
            enabled: user.enabled,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

fn map_credentials_error(err: CredentialsError) -> Error {
    let (field, code) = match err {
        CredentialsError::EmptyUsername => ("username", "empty_username"),
        CredentialsError::EmptyPassword => ("password", "empty_password"),
        CredentialsError::EmptyFullName => ("fullName", "empty_full_name"),
        CredentialsError::EmptyEmail => ("email", "empty_email"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Register a new citizen account and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username already taken", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let registration = Registration::try_from_parts(
        &payload.username,
        &payload.password,
        &payload.full_name,
        &payload.email,
        &payload.phone,
    )
    .map_err(map_credentials_error)?;

    let user = state.registration.register(registration).await?;
    session.persist_subject(&user.username)?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_credentials_error)?;

    let user = state.login.authenticate(&credentials).await?;
    session.persist_subject(&user.username)?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Drop the caller's session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tags = ["auth"],
    operation_id = "logout",
    security(("SessionCookie" = []))
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}
