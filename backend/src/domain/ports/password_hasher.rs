//! Driven port for one-way password digesting.
//!
//! The domain treats hashing as opaque: it stores whatever digest the
//! hasher produces and asks the same hasher to verify later attempts. The
//! concrete algorithm lives in an outbound adapter and can be swapped
//! without touching the engine or the services.

use crate::domain::user::PasswordHash;

/// One-way password digest function with verification.
pub trait PasswordHasher: Send + Sync {
    /// Digest a plaintext password for storage.
    fn hash(&self, password: &str) -> PasswordHash;

    /// Check a plaintext password against a stored digest.
    fn verify(&self, password: &str, hash: &PasswordHash) -> bool;
}
