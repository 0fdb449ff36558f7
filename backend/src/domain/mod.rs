//! Domain types and services for disaster-relief claim intake and review.
//!
//! The module is arranged hexagonally: [`ports`] declares the traits the HTTP
//! layer drives and the traits the persistence adapters implement, while the
//! concrete services here ([`ClaimsService`], [`PasswordLoginService`],
//! [`RegistrationServiceImpl`], [`AdminProvisioner`]) hold the business rules
//! and stay ignorant of both Actix and Diesel.

pub mod auth;
pub mod claim;
pub mod claims;
pub mod error;
pub mod identity;
pub mod login;
pub mod ports;
pub mod provisioning;
pub mod statistics;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{CredentialsError, LoginCredentials, Registration};
pub use claim::{
    Amount, AmountError, Claim, ClaimDraft, ClaimDraftError, ClaimId, ClaimPatch, ClaimStatus,
    ParseClaimStatusError,
};
pub use claims::ClaimsService;
pub use error::{Error, ErrorCode};
pub use identity::IdentityResolverImpl;
pub use login::{PasswordLoginService, RegistrationServiceImpl};
pub use provisioning::AdminProvisioner;
pub use statistics::ClaimStatistics;
pub use user::{ParseRoleError, PasswordHash, Role, User, UserId, Username, UsernameError};
