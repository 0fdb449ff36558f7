//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod claims;
pub mod error;
pub(crate) mod guards;
pub mod health;
pub mod session;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub(crate) mod validation;

pub use error::ApiResult;
