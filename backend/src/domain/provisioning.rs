//! Idempotent admin account provisioning run at process start.
//!
//! Review endpoints are useless without at least one administrator, so the
//! fixed `admin` account is upserted unconditionally on every boot: a fresh
//! store gains the account, an existing one has its password, role, and
//! enabled flag reset to the known-good values while keeping its id.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::error::Error;
use crate::domain::ports::{PasswordHasher, UserPersistenceError, UserRepository};
use crate::domain::user::{Role, User, UserId, Username};

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "Admin@2025";
const ADMIN_FULL_NAME: &str = "System Administrator";
const ADMIN_EMAIL: &str = "admin@ny.gov";
const ADMIN_PHONE: &str = "000-000-0000";

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::internal(format!("unexpected username conflict: {username}"))
        }
    }
}

/// Seeds the fixed admin account during process initialization.
#[derive(Clone)]
pub struct AdminProvisioner<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AdminProvisioner<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Create a provisioner over the given repository and hasher.
    pub const fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }

    /// Upsert the admin account, preserving its id when it already exists.
    pub async fn ensure_admin(&self) -> Result<(), Error> {
        let username = Username::new(ADMIN_USERNAME)
            .map_err(|err| Error::internal(format!("invalid admin username: {err}")))?;
        let existing = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_error)?;

        let now = Utc::now();
        let (id, created_at) = existing
            .map_or_else(|| (UserId::generate(), now), |user| (user.id, user.created_at));

        let admin = User {
            id,
            username,
            password_hash: self.hasher.hash(ADMIN_PASSWORD),
            full_name: ADMIN_FULL_NAME.to_owned(),
            email: ADMIN_EMAIL.to_owned(),
            phone: ADMIN_PHONE.to_owned(),
            role: Role::Admin,
            enabled: true,
            created_at,
            updated_at: now,
        };

        self.users.upsert(&admin).await.map_err(map_user_error)?;
        info!(username = ADMIN_USERNAME, "admin account ensured");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::test_support::{account, InMemoryUserRepository};
    use crate::domain::user::PasswordHash;
    use rstest::rstest;

    struct FakeHasher;

    impl PasswordHasher for FakeHasher {
        fn hash(&self, password: &str) -> PasswordHash {
            PasswordHash::new(format!("fake:{password}"))
        }

        fn verify(&self, password: &str, hash: &PasswordHash) -> bool {
            hash.as_str() == format!("fake:{password}")
        }
    }

    fn provisioner(
        repo: Arc<InMemoryUserRepository>,
    ) -> AdminProvisioner<InMemoryUserRepository, FakeHasher> {
        AdminProvisioner::new(repo, Arc::new(FakeHasher))
    }

    #[tokio::test]
    async fn creates_admin_when_missing() {
        let repo = Arc::new(InMemoryUserRepository::default());

        provisioner(Arc::clone(&repo))
            .ensure_admin()
            .await
            .expect("provisioning should succeed");

        let stored = repo.stored();
        assert_eq!(stored.len(), 1);
        let admin = &stored[0];
        assert_eq!(admin.username.as_str(), "admin");
        assert_eq!(admin.role, Role::Admin);
        assert!(admin.enabled);
        assert_eq!(admin.password_hash.as_str(), "fake:Admin@2025");
    }

    #[tokio::test]
    async fn repeated_runs_preserve_the_account_id() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let seeder = provisioner(Arc::clone(&repo));

        seeder.ensure_admin().await.expect("first run");
        let first_id = repo.stored()[0].id;
        seeder.ensure_admin().await.expect("second run");

        let stored = repo.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, first_id);
    }

    #[tokio::test]
    async fn drifted_admin_record_is_reset() {
        let mut drifted = account("admin", Role::User);
        drifted.enabled = false;
        let repo = Arc::new(InMemoryUserRepository::with_users(vec![drifted.clone()]));

        provisioner(Arc::clone(&repo))
            .ensure_admin()
            .await
            .expect("provisioning should succeed");

        let stored = repo.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, drifted.id);
        assert_eq!(stored[0].role, Role::Admin);
        assert!(stored[0].enabled);
    }

    #[rstest]
    #[case(
        UserPersistenceError::connection("database unavailable"),
        ErrorCode::ServiceUnavailable
    )]
    #[case(UserPersistenceError::query("bad query"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn store_failures_surface(
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let repo = Arc::new(InMemoryUserRepository::default());
        repo.set_failure(failure);

        let err = provisioner(repo)
            .ensure_admin()
            .await
            .expect_err("store failure must surface");
        assert_eq!(err.code(), expected);
    }
}
