//! Identity resolution over the user repository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::ports::{IdentityResolver, UserPersistenceError, UserRepository};
use crate::domain::user::{User, Username};

/// [`IdentityResolver`] backed by the user repository.
#[derive(Clone)]
pub struct IdentityResolverImpl<U> {
    users: Arc<U>,
}

impl<U> IdentityResolverImpl<U> {
    /// Create a resolver over the given repository.
    pub const fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

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

#[async_trait]
impl<U> IdentityResolver for IdentityResolverImpl<U>
where
    U: UserRepository,
{
    async fn resolve(&self, username: &Username) -> Result<User, Error> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_error)?;
        user.ok_or_else(|| Error::not_found("user not found"))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::test_support::{account, username, InMemoryUserRepository};
    use crate::domain::user::Role;
    use rstest::rstest;

    #[tokio::test]
    async fn resolves_existing_account() {
        let alice = account("alice", Role::User);
        let resolver = IdentityResolverImpl::new(Arc::new(InMemoryUserRepository::with_users(
            vec![alice.clone()],
        )));

        let resolved = resolver
            .resolve(&username("alice"))
            .await
            .expect("resolution should succeed");
        assert_eq!(resolved, alice);
    }

    #[tokio::test]
    async fn missing_account_is_not_found() {
        let resolver = IdentityResolverImpl::new(Arc::new(InMemoryUserRepository::default()));

        let err = resolver
            .resolve(&username("ghost"))
            .await
            .expect_err("missing accounts must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(
        UserPersistenceError::connection("database unavailable"),
        ErrorCode::ServiceUnavailable
    )]
    #[case(UserPersistenceError::query("bad query"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn store_failures_map_to_domain_errors(
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let repo = Arc::new(InMemoryUserRepository::default());
        repo.set_failure(failure);
        let resolver = IdentityResolverImpl::new(repo);

        let err = resolver
            .resolve(&username("alice"))
            .await
            .expect_err("store failure must surface");
        assert_eq!(err.code(), expected);
    }
}
