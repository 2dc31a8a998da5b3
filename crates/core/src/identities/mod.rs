//! Identities module - the directory of identities seen by the service.

mod identities_model;
mod identities_service;
mod identities_traits;

#[cfg(test)]
mod identities_service_tests;

pub use identities_model::IdentityRecord;
pub use identities_service::IdentityService;
pub use identities_traits::{IdentityRepositoryTrait, IdentityServiceTrait};
