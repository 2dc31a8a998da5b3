//! Rate limits module - per-identity search quotas.
//!
//! [`RateLimitService`] implements the quota contract over any
//! [`RateLimitStoreTrait`] backing store. [`RateLimitAdminService`] is the
//! administrative surface on top of it and keeps the identity directory's
//! mirror fields in step.

mod rate_limits_admin_service;
mod rate_limits_model;
mod rate_limits_service;
mod rate_limits_store;
mod rate_limits_traits;


pub use rate_limits_admin_service::RateLimitAdminService;
pub use rate_limits_model::{
    DecrementOutcome, RateLimitInfo, RateLimitRecord, RateLimitResetResult, RateLimitUpdate,
};
pub use rate_limits_service::RateLimitService;
pub use rate_limits_store::InMemoryRateLimitStore;
pub use rate_limits_traits::{RateLimitAdminServiceTrait, RateLimitStoreTrait};
