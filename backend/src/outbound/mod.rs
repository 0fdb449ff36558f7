//! Outbound adapters implementing domain ports for infrastructure concerns.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **password**: salted SHA-256 credential hashing
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations; they contain no business logic.

pub mod password;
pub mod persistence;

pub use password::SaltedSha256Hasher;
