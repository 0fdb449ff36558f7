//! Session helpers keeping HTTP handlers free of framework-specific logic.
//!
//! The session cookie stores only the authenticated username. Role and
//! enablement are re-resolved from the user store on every request, so a
//! demoted or disabled account loses access without waiting for its cookie
//! to expire.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Username};

pub(crate) const SUBJECT_KEY: &str = "username";

/// Newtype wrapper exposing higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated username in the session cookie.
    ///
    /// Renews the cookie key to invalidate any session fixation attempt.
    pub fn persist_subject(&self, username: &Username) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(SUBJECT_KEY, username.as_str())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current subject from the session, if present.
    pub fn subject(&self) -> Result<Option<Username>, Error> {
        let raw = self
            .0
            .get::<String>(SUBJECT_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match raw {
            Some(raw) => match Username::new(&raw) {
                Ok(username) => Ok(Some(username)),
                Err(error) => {
                    tracing::warn!("invalid subject in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated subject or return `401 Unauthorized`.
    pub fn require_subject(&self) -> Result<Username, Error> {
        self.subject()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop the session entirely.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().wrap(crate::inbound::http::test_utils::test_session_middleware())
    }

    fn session_cookie(
        res: &actix_web::dev::ServiceResponse,
    ) -> actix_web::cookie::Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn round_trips_the_subject() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        let name = Username::new("alice").expect("fixture username");
                        session.persist_subject(&name)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let name = session.require_subject()?;
                        Ok::<_, Error>(HttpResponse::Ok().body(name.as_str().to_owned()))
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = session_cookie(&set_res);

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, "alice");
    }

    #[actix_web::test]
    async fn missing_subject_is_unauthorised() {
        let app = test::init_service(session_test_app().route(
            "/require",
            web::get().to(|session: SessionContext| async move {
                let _ = session.require_subject()?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/require").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn blank_subject_is_unauthorised() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set-blank",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(SUBJECT_KEY, "   ")
                            .expect("set blank subject");
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/require",
                    web::get().to(|session: SessionContext| async move {
                        let _ = session.require_subject()?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                ),
        )
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-blank").to_request(),
        )
        .await;
        let cookie = session_cookie(&set_res);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
