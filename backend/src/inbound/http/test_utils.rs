//! Test helpers for inbound HTTP components.
//!
//! Builds a fully wired [`HttpState`] over the in-memory repositories so
//! handler tests exercise the real services without a database.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;

use crate::domain::ports::PasswordHasher;
use crate::domain::test_support::{InMemoryClaimRepository, InMemoryUserRepository};
use crate::domain::{
    Claim, ClaimsService, IdentityResolverImpl, PasswordLoginService, RegistrationServiceImpl,
    Role, User,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::password::SaltedSha256Hasher;

/// Build a session middleware configured for tests.
///
/// Generates a fresh signing key per invocation, names the cookie `session`,
/// and disables the `Secure` flag for plain-HTTP test requests.
pub(crate) fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handles to the in-memory stores behind a wired [`HttpState`].
pub(crate) struct TestBackend {
    pub state: HttpState,
    pub users: Arc<InMemoryUserRepository>,
    pub claims: Arc<InMemoryClaimRepository>,
}

/// Wire real services over in-memory stores seeded with `accounts` and
/// `claims`.
pub(crate) fn backend_with(accounts: Vec<User>, claims: Vec<Claim>) -> TestBackend {
    let users = Arc::new(InMemoryUserRepository::with_users(accounts));
    let claims = Arc::new(InMemoryClaimRepository::with_claims(claims));
    let hasher = Arc::new(SaltedSha256Hasher);

    let state = HttpState {
        claims_command: Arc::new(ClaimsService::new(Arc::clone(&claims), Arc::clone(&users))),
        claims_query: Arc::new(ClaimsService::new(Arc::clone(&claims), Arc::clone(&users))),
        identity: Arc::new(IdentityResolverImpl::new(Arc::clone(&users))),
        login: Arc::new(PasswordLoginService::new(
            Arc::clone(&users),
            Arc::clone(&hasher),
        )),
        registration: Arc::new(RegistrationServiceImpl::new(Arc::clone(&users), hasher)),
    };

    TestBackend {
        state,
        users,
        claims,
    }
}

/// Shorthand for [`backend_with`] when only the state is needed.
pub(crate) fn state_with_accounts(accounts: Vec<User>) -> HttpState {
    backend_with(accounts, Vec::new()).state
}

/// Account fixture whose stored hash verifies against `password`.
pub(crate) fn account_with_password(name: &str, role: Role, password: &str) -> User {
    let mut user = crate::domain::test_support::account(name, role);
    user.password_hash = SaltedSha256Hasher.hash(password);
    user
}
