//! Driven port for durable user storage.

use async_trait::async_trait;

use crate::domain::user::{User, UserId, Username};

/// Failures surfaced by a user repository implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// The backing store could not be reached.
    #[error("user store connection failed: {message}")]
    Connection {
        /// Human-readable description of the failure.
        message: String,
    },
    /// The store rejected or failed the operation.
    #[error("user store query failed: {message}")]
    Query {
        /// Human-readable description of the failure.
        message: String,
    },
    /// An insert collided with an existing username.
    #[error("username already taken: {username}")]
    DuplicateUsername {
        /// The conflicting username.
        username: String,
    },
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a duplicate-username error for the given name.
    pub fn duplicate_username(username: impl Into<String>) -> Self {
        Self::DuplicateUsername {
            username: username.into(),
        }
    }
}

/// Durable mapping from user id/username to account records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account, failing on username collision.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Insert or update the account identified by `user.id`.
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Look up an account by unique username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Look up an account by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}
