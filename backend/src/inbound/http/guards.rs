//! Role gating for administrative endpoints.
//!
//! The session carries only the username; the guard re-resolves the account
//! on every request so a role change or account disablement takes effect
//! immediately.

use crate::domain::{Error, User};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Require the session subject to resolve to an enabled administrator.
pub(crate) async fn require_admin(
    state: &HttpState,
    session: &SessionContext,
) -> Result<User, Error> {
    let username = session.require_subject()?;
    let user = state.identity.resolve(&username).await.map_err(|err| {
        // A stale session naming a deleted account is an auth failure, not
        // a missing resource.
        if matches!(err.code(), crate::domain::ErrorCode::NotFound) {
            Error::unauthorized("login required")
        } else {
            err
        }
    })?;

    if !user.enabled {
        return Err(Error::unauthorized("account is disabled"));
    }
    if !user.role.is_admin() {
        return Err(Error::forbidden("administrator role required"));
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::Role;
    use crate::inbound::http::test_utils::{state_with_accounts, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    async fn gate_status(accounts: Vec<crate::domain::User>, login_as: Option<&str>) -> StatusCode {
        let state = state_with_accounts(accounts);
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .route(
                    "/login-as/{name}",
                    web::get().to(
                        |session: SessionContext, path: web::Path<String>| async move {
                            let name = crate::domain::Username::new(path.into_inner())
                                .expect("fixture username");
                            session.persist_subject(&name)?;
                            Ok::<_, Error>(HttpResponse::Ok())
                        },
                    ),
                )
                .route(
                    "/gated",
                    web::get().to(
                        |state: web::Data<HttpState>, session: SessionContext| async move {
                            require_admin(&state, &session).await?;
                            Ok::<_, Error>(HttpResponse::Ok())
                        },
                    ),
                ),
        )
        .await;

        let mut request = test::TestRequest::get().uri("/gated");
        if let Some(name) = login_as {
            let login = test::call_service(
                &app,
                test::TestRequest::get()
                    .uri(&format!("/login-as/{name}"))
                    .to_request(),
            )
            .await;
            let cookie = login
                .response()
                .cookies()
                .find(|cookie| cookie.name() == "session")
                .expect("session cookie set")
                .into_owned();
            request = request.cookie(cookie);
        }
        test::call_service(&app, request.to_request()).await.status()
    }

    fn account(name: &str, role: Role) -> crate::domain::User {
        crate::domain::test_support::account(name, role)
    }

    #[actix_web::test]
    async fn anonymous_callers_are_unauthorised() {
        let status = gate_status(vec![account("admin", Role::Admin)], None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn citizens_are_forbidden() {
        let status = gate_status(vec![account("alice", Role::User)], Some("alice")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn administrators_pass() {
        let status = gate_status(vec![account("admin", Role::Admin)], Some("admin")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn sessions_for_deleted_accounts_are_unauthorised() {
        let status = gate_status(vec![account("admin", Role::Admin)], Some("ghost")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn disabled_administrators_are_unauthorised() {
        let mut admin = account("admin", Role::Admin);
        admin.enabled = false;
        let status = gate_status(vec![admin], Some("admin")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
