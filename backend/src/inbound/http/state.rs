//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data`, so they depend only
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ClaimsCommand, ClaimsQuery, IdentityResolver, LoginService, RegistrationService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub claims_command: Arc<dyn ClaimsCommand>,
    pub claims_query: Arc<dyn ClaimsQuery>,
    pub identity: Arc<dyn IdentityResolver>,
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
}
