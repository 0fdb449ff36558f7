//! Salted SHA-256 password hashing adapter.
//!
//! Credentials are stored as `hex(salt)$hex(sha256(salt || password))`. A
//! fresh 16-byte salt is drawn per hash so identical passwords never share a
//! stored digest.

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::domain::ports::PasswordHasher;
use crate::domain::user::PasswordHash;

const SALT_LEN: usize = 16;

fn digest_with_salt(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// [`PasswordHasher`] backed by `sha2` with per-credential random salts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaltedSha256Hasher;

impl PasswordHasher for SaltedSha256Hasher {
    fn hash(&self, password: &str) -> PasswordHash {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let digest = digest_with_salt(&salt, password);
        PasswordHash::new(format!("{}${digest}", hex::encode(salt)))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> bool {
        let Some((salt_hex, digest)) = hash.as_str().split_once('$') else {
            return false;
        };
        let Ok(salt) = hex::decode(salt_hex) else {
            return false;
        };
        digest_with_salt(&salt, password) == digest
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hash_then_verify_accepts_the_original_password() {
        let hasher = SaltedSha256Hasher;
        let hash = hasher.hash("Admin@2025");
        assert!(hasher.verify("Admin@2025", &hash));
    }

    #[rstest]
    fn verify_rejects_a_different_password() {
        let hasher = SaltedSha256Hasher;
        let hash = hasher.hash("Admin@2025");
        assert!(!hasher.verify("admin@2025", &hash));
    }

    #[rstest]
    fn identical_passwords_hash_differently() {
        let hasher = SaltedSha256Hasher;
        let first = hasher.hash("hunter2");
        let second = hasher.hash("hunter2");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    #[case("no-separator")]
    #[case("not-hex$digest")]
    #[case("")]
    fn verify_rejects_malformed_stored_hashes(#[case] stored: &str) {
        let hasher = SaltedSha256Hasher;
        assert!(!hasher.verify("anything", &PasswordHash::new(stored)));
    }
}
