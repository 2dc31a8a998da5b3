use async_trait::async_trait;

use super::rate_limits_model::{RateLimitInfo, RateLimitRecord, RateLimitResetResult};
use crate::access::AdminCapability;
use crate::errors::Result;

/// Backing store primitives for search quotas.
///
/// The store is shared by every concurrent search. Each method must be a
/// single atomic operation against the store; callers never compose a read
/// with a later write.
#[async_trait]
pub trait RateLimitStoreTrait: Send + Sync {
    /// Returns the record, or `None` if the identity was never initialized.
    async fn get_record(&self, identity_id: &str) -> Result<Option<RateLimitRecord>>;

    /// Sets both ceiling and remaining to `ceiling`, creating the record if needed.
    async fn put_limit(&self, identity_id: &str, ceiling: u32) -> Result<()>;

    /// Decrements remaining iff it is positive.
    ///
    /// Returns the new remaining value, or `None` when nothing was decremented
    /// (record absent or remaining already 0).
    async fn decrement_if_positive(&self, identity_id: &str) -> Result<Option<u32>>;

    /// Sets remaining back to the ceiling iff the ceiling is positive.
    ///
    /// Returns the ceiling, or `None` when nothing changed.
    async fn reset_to_ceiling(&self, identity_id: &str) -> Result<Option<u32>>;
}

/// Administrative quota operations.
#[async_trait]
pub trait RateLimitAdminServiceTrait: Send + Sync {
    async fn get_info(&self, cap: &AdminCapability, user_id: &str) -> Result<RateLimitInfo>;

    /// Sets the identity's ceiling and refills its remaining quota.
    async fn update_limit(
        &self,
        cap: &AdminCapability,
        user_id: &str,
        search_limit: u32,
    ) -> Result<RateLimitInfo>;

    async fn reset(&self, cap: &AdminCapability, user_id: &str) -> Result<RateLimitResetResult>;

    /// Refills every initialized identity.
    async fn reset_all(&self, cap: &AdminCapability) -> Result<RateLimitResetResult>;

    /// Sets the same ceiling on every known identity, initialized or not.
    async fn set_universal_limit(
        &self,
        cap: &AdminCapability,
        search_limit: u32,
    ) -> Result<RateLimitResetResult>;
}
