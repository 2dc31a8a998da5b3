//! Stockwatch Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for Stockwatch: the stock
//! registry, per-identity search quotas and the rate-limited search that
//! composes them with external ticker validation. It is database-agnostic
//! and defines traits that are implemented by the `storage-sqlite` crate.

pub mod access;
pub mod constants;
pub mod errors;
pub mod identities;
pub mod rate_limits;
pub mod search;
pub mod stocks;

#[cfg(test)]
pub(crate) mod test_support;

pub use access::{AdminCapability, Identity, Role};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
