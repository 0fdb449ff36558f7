//! Authentication services: credential verification and self-registration.
//!
//! Both services are generic over the user repository and the password
//! hasher ports so handler tests can run them against in-memory doubles.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::domain::auth::{LoginCredentials, Registration};
use crate::domain::error::Error;
use crate::domain::ports::{
    LoginService, PasswordHasher, RegistrationService, UserPersistenceError, UserRepository,
};
use crate::domain::user::{Role, User, UserId};

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::conflict("username already taken").with_details(json!({
                "field": "username",
                "value": username,
                "code": "duplicate_username",
            }))
        }
    }
}

fn bad_credentials() -> Error {
    // One message for unknown usernames and wrong passwords alike.
    Error::unauthorized("invalid username or password")
}

/// [`LoginService`] verifying passwords against stored digests.
#[derive(Clone)]
pub struct PasswordLoginService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> PasswordLoginService<U, H> {
    /// Create a login service over the given repository and hasher.
    pub const fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U, H> LoginService for PasswordLoginService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let user = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
            .ok_or_else(bad_credentials)?;

        if !user.enabled {
            return Err(Error::unauthorized("account is disabled"));
        }
        if !self
            .hasher
            .verify(credentials.password(), &user.password_hash)
        {
            return Err(bad_credentials());
        }
        Ok(user)
    }
}

/// [`RegistrationService`] creating enabled citizen accounts.
#[derive(Clone)]
pub struct RegistrationServiceImpl<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> RegistrationServiceImpl<U, H> {
    /// Create a registration service over the given repository and hasher.
    pub const fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U, H> RegistrationService for RegistrationServiceImpl<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let now = Utc::now();
        let credentials = registration.credentials();
        let user = User {
            id: UserId::generate(),
            username: credentials.username().clone(),
            password_hash: self.hasher.hash(credentials.password()),
            full_name: registration.full_name().to_owned(),
            email: registration.email().to_owned(),
            phone: registration.phone().to_owned(),
            role: Role::User,
            enabled: true,
            created_at: now,
            updated_at: now,
        };

        self.users.insert(&user).await.map_err(map_user_error)?;
        info!(username = %user.username, "account registered");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::test_support::{account, registration, InMemoryUserRepository};
    use crate::domain::user::PasswordHash;
    use rstest::rstest;

    /// Hasher double that prefixes instead of digesting.
    struct FakeHasher;

    impl PasswordHasher for FakeHasher {
        fn hash(&self, password: &str) -> PasswordHash {
            PasswordHash::new(format!("fake:{password}"))
        }

        fn verify(&self, password: &str, hash: &PasswordHash) -> bool {
            hash.as_str() == format!("fake:{password}")
        }
    }

    fn credentials(username: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(username, password).expect("valid test credentials")
    }

    fn stored_account(name: &str, password: &str, enabled: bool) -> User {
        let mut user = account(name, Role::User);
        user.password_hash = FakeHasher.hash(password);
        user.enabled = enabled;
        user
    }

    fn login_service(
        users: Vec<User>,
    ) -> PasswordLoginService<InMemoryUserRepository, FakeHasher> {
        PasswordLoginService::new(
            Arc::new(InMemoryUserRepository::with_users(users)),
            Arc::new(FakeHasher),
        )
    }

    #[tokio::test]
    async fn correct_credentials_authenticate() {
        let service = login_service(vec![stored_account("alice", "hunter2", true)]);

        let user = service
            .authenticate(&credentials("alice", "hunter2"))
            .await
            .expect("authentication should succeed");
        assert_eq!(user.username.as_str(), "alice");
    }

    #[rstest]
    #[case("alice", "wrong")]
    #[case("ghost", "hunter2")]
    #[tokio::test]
    async fn bad_credentials_are_unauthorized(#[case] username: &str, #[case] password: &str) {
        let service = login_service(vec![stored_account("alice", "hunter2", true)]);

        let err = service
            .authenticate(&credentials(username, password))
            .await
            .expect_err("bad credentials must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "invalid username or password");
    }

    #[tokio::test]
    async fn disabled_accounts_cannot_authenticate() {
        let service = login_service(vec![stored_account("alice", "hunter2", false)]);

        let err = service
            .authenticate(&credentials("alice", "hunter2"))
            .await
            .expect_err("disabled accounts must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn registration_creates_enabled_citizen_account() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let service = RegistrationServiceImpl::new(Arc::clone(&repo), Arc::new(FakeHasher));

        let user = service
            .register(registration("carol"))
            .await
            .expect("registration should succeed");

        assert_eq!(user.role, Role::User);
        assert!(user.enabled);
        assert_eq!(user.password_hash.as_str(), "fake:pw");
        assert_eq!(repo.stored().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let repo = Arc::new(InMemoryUserRepository::with_users(vec![account(
            "carol",
            Role::User,
        )]));
        let service = RegistrationServiceImpl::new(repo, Arc::new(FakeHasher));

        let err = service
            .register(registration("carol"))
            .await
            .expect_err("duplicate usernames must fail");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }
}
