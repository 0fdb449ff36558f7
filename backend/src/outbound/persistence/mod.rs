//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Thin adapters translating between Diesel row structs and domain types;
//! no business logic lives here. Connections come from a `bb8` pool with
//! native async support through `diesel-async`, and every database failure
//! is mapped to a domain persistence error before it leaves this module.

mod diesel_claim_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_claim_repository::DieselClaimRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
