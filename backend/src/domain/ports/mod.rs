//! Domain ports.
//!
//! Driving ports ([`ClaimsCommand`], [`ClaimsQuery`], [`IdentityResolver`],
//! [`LoginService`], [`RegistrationService`]) are implemented by domain
//! services and called by inbound adapters. Driven ports
//! ([`UserRepository`], [`ClaimRepository`], [`PasswordHasher`]) are
//! implemented by outbound adapters.

mod claim_repository;
mod claims;
mod identity;
mod password_hasher;
mod user_repository;

pub use claim_repository::{ClaimPersistenceError, ClaimRepository};
pub use claims::{ClaimsCommand, ClaimsQuery};
pub use identity::{IdentityResolver, LoginService, RegistrationService};
pub use password_hasher::PasswordHasher;
pub use user_repository::{UserPersistenceError, UserRepository};
