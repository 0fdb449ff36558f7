//! Server construction and middleware wiring.

mod config;

pub use config::{AppSettings, ServerConfig};

use std::sync::Arc;

use actix_session::{
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
    SessionMiddleware,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};

#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::{
    ClaimsService, IdentityResolverImpl, PasswordLoginService, RegistrationServiceImpl,
};
use backend::inbound::http::auth::{login, logout, register};
use backend::inbound::http::claims;
use backend::inbound::http::health::{live, ready, HealthState};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{DbPool, DieselClaimRepository, DieselUserRepository};
use backend::outbound::SaltedSha256Hasher;
use backend::Trace;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire database-backed adapters into the HTTP dependency bundle.
pub fn build_http_state(pool: &DbPool) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let claims = Arc::new(DieselClaimRepository::new(pool.clone()));
    let hasher = Arc::new(SaltedSha256Hasher);

    HttpState {
        claims_command: Arc::new(ClaimsService::new(Arc::clone(&claims), Arc::clone(&users))),
        claims_query: Arc::new(ClaimsService::new(claims, Arc::clone(&users))),
        identity: Arc::new(IdentityResolverImpl::new(Arc::clone(&users))),
        login: Arc::new(PasswordLoginService::new(
            Arc::clone(&users),
            Arc::clone(&hasher),
        )),
        registration: Arc::new(RegistrationServiceImpl::new(users, hasher)),
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api")
        .wrap(session)
        .service(
            web::scope("/auth")
                .service(register)
                .service(login)
                .service(logout),
        )
        .service(web::scope("/claims").configure(claims::configure));

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool,
    } = config;
    let http_state = web::Data::new(build_http_state(&db_pool));

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
