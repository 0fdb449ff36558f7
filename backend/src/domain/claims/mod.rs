//! Claim engine module.

mod service;

pub use service::ClaimsService;
