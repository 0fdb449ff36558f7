//! Authentication primitives: login credentials and registration input.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::user::{Username, UsernameError};

/// Domain error returned when authentication payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Full name was missing or blank once trimmed.
    #[error("full name must not be empty")]
    EmptyFullName,
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
}

/// Validated login credentials used by the authentication service.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialsError> {
        let username = Username::new(username).map_err(|UsernameError::Empty| {
            CredentialsError::EmptyUsername
        })?;
        if password.is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for account lookup.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"..")
            .finish()
    }
}

/// Validated registration input for creating a citizen account.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    credentials: LoginCredentials,
    full_name: String,
    email: String,
    phone: String,
}

impl Registration {
    /// Construct a registration from raw form fields.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        full_name: &str,
        email: &str,
        phone: &str,
    ) -> Result<Self, CredentialsError> {
        let credentials = LoginCredentials::try_from_parts(username, password)?;
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(CredentialsError::EmptyFullName);
        }
        let email = email.trim();
        if email.is_empty() {
            return Err(CredentialsError::EmptyEmail);
        }
        Ok(Self {
            credentials,
            full_name: full_name.to_owned(),
            email: email.to_owned(),
            phone: phone.trim().to_owned(),
        })
    }

    /// Login credentials embedded in the registration.
    #[must_use]
    pub fn credentials(&self) -> &LoginCredentials {
        &self.credentials
    }

    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Contact email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Contact phone, possibly empty.
    #[must_use]
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("credentials", &self.credentials)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .finish()
    }
}
