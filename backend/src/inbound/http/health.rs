//! Liveness and readiness probes for orchestration and load balancers.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{get, http::header, web, HttpResponse};

/// Shared probe state.
///
/// The process starts live but not ready; readiness flips once the pool is
/// built and the admin account is provisioned.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as draining so liveness probes fail before shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe: 200 once dependencies are initialised, 503 before.
#[utoipa::path(
    get,
    path = "/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe: 200 while the process is alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    async fn probe(state: HealthState, uri: &str) -> StatusCode {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(ready)
                .service(live),
        )
        .await;
        test::call_service(&app, test::TestRequest::get().uri(uri).to_request())
            .await
            .status()
    }

    #[actix_web::test]
    async fn ready_is_unavailable_until_marked() {
        assert_eq!(
            probe(HealthState::new(), "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );

        let state = HealthState::new();
        state.mark_ready();
        assert_eq!(probe(state, "/ready").await, StatusCode::OK);
    }

    #[actix_web::test]
    async fn live_fails_once_draining() {
        assert_eq!(probe(HealthState::new(), "/live").await, StatusCode::OK);

        let state = HealthState::new();
        state.mark_unhealthy();
        assert_eq!(
            probe(state, "/live").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
