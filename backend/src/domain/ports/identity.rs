//! Driving ports for identity resolution and authentication.

use async_trait::async_trait;

use crate::domain::auth::{LoginCredentials, Registration};
use crate::domain::error::Error;
use crate::domain::user::{User, Username};

/// Maps an authenticated principal's username to an account record.
///
/// The boundary adapter consults this for role gating; the engine consults
/// it for ownership checks. Pure lookup, no side effects.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve a username to its account, failing with `NotFound` when no
    /// such account exists.
    async fn resolve(&self, username: &Username) -> Result<User, Error>;
}

/// Credential verification use-case.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated account.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

/// Account creation use-case for citizen self-registration.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create a new enabled citizen account, failing with `Conflict` when
    /// the username is already taken.
    async fn register(&self, registration: Registration) -> Result<User, Error>;
}
