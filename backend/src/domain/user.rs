//! User identity types.
//!
//! Purpose: strongly typed account records shared by the identity resolver,
//! the claim engine's ownership checks, and the authentication services.
//! Validation happens in the constructors so adapters never hand the domain
//! an unchecked username or role string.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Unique user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failure raised by [`Username::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UsernameError {
    /// The username was empty once trimmed.
    #[error("username must not be empty")]
    Empty,
}

/// Trimmed, non-empty account name used as the authentication subject.
///
/// ## Invariants
/// - never empty after trimming; surrounding whitespace is removed at
///   construction so lookups behave identically regardless of caller input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Construct a username from raw input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UsernameError> {
        let normalized = raw.as_ref().trim();
        if normalized.is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Borrow the username string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Account role deciding which routes the boundary exposes to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// A citizen submitting and managing their own claims.
    User,
    /// An administrator reviewing the claim queue.
    Admin,
}

impl Role {
    /// Wire and storage name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    /// Whether this role grants access to the admin review surface.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a stored role name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            other => Err(ParseRoleError(other.to_owned())),
        }
    }
}

/// Opaque password digest produced by the hashing port.
///
/// The digest is already one-way; the custom `Debug` impl still keeps it out
/// of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a digest string produced by a hasher or read from the store.
    #[must_use]
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Borrow the digest string for storage or verification.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// A registered account.
///
/// ## Invariants
/// - `id` is immutable once assigned.
/// - `username` is unique across the store (enforced by the repository).
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Immutable identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: Username,
    /// One-way digest of the account password.
    pub password_hash: PasswordHash,
    /// Full display name.
    pub full_name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Access role.
    pub role: Role,
    /// Disabled accounts cannot authenticate.
    pub enabled: bool,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}
