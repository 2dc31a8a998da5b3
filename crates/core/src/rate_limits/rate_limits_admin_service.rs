use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::info;

use super::rate_limits_model::{RateLimitInfo, RateLimitResetResult};
use super::rate_limits_service::RateLimitService;
use super::rate_limits_traits::RateLimitAdminServiceTrait;
use crate::access::AdminCapability;
use crate::errors::{Error, Result};
use crate::identities::{IdentityRecord, IdentityRepositoryTrait};

pub struct RateLimitAdminService {
    rate_limits: RateLimitService,
    identities: Arc<dyn IdentityRepositoryTrait>,
}

impl RateLimitAdminService {
    pub fn new(rate_limits: RateLimitService, identities: Arc<dyn IdentityRepositoryTrait>) -> Self {
        Self {
            rate_limits,
            identities,
        }
    }

    fn require_identity(&self, user_id: &str) -> Result<IdentityRecord> {
        self.identities
            .get_identity(user_id)?
            .ok_or_else(|| Error::not_found("User", user_id))
    }

    async fn info_for(&self, record: &IdentityRecord) -> Result<RateLimitInfo> {
        let ceiling = self.rate_limits.get_ceiling(&record.id).await?;
        let remaining = self.rate_limits.get_remaining(&record.id).await?;

        Ok(RateLimitInfo {
            user_id: record.id.clone(),
            username: record.username.clone(),
            search_limit: ceiling,
            searches_used: ceiling.saturating_sub(remaining),
            remaining_searches: remaining,
            last_reset_at: record.last_reset_at,
        })
    }
}

#[async_trait]
impl RateLimitAdminServiceTrait for RateLimitAdminService {
    async fn get_info(&self, _cap: &AdminCapability, user_id: &str) -> Result<RateLimitInfo> {
        let record = self.require_identity(user_id)?;
        self.info_for(&record).await
    }

    async fn update_limit(
        &self,
        cap: &AdminCapability,
        user_id: &str,
        search_limit: u32,
    ) -> Result<RateLimitInfo> {
        self.require_identity(user_id)?;

        self.rate_limits.set_ceiling(user_id, search_limit).await?;
        self.identities
            .record_limit_reset(vec![user_id.to_string()], Some(search_limit), Utc::now())
            .await?;
        info!(
            "{} set search limit of {} to {}",
            cap.actor_id(),
            user_id,
            search_limit
        );

        let record = self.require_identity(user_id)?;
        self.info_for(&record).await
    }

    async fn reset(&self, cap: &AdminCapability, user_id: &str) -> Result<RateLimitResetResult> {
        let record = self.require_identity(user_id)?;

        if !self.rate_limits.reset(user_id).await? {
            return Err(Error::invalid_input(format!(
                "Rate limit is not initialized for user {}",
                record.username
            )));
        }
        self.identities
            .record_limit_reset(vec![user_id.to_string()], None, Utc::now())
            .await?;
        info!("{} reset search quota of {}", cap.actor_id(), user_id);

        Ok(RateLimitResetResult {
            success: true,
            message: format!("Rate limit reset successfully for user {}", record.username),
            affected_users: 1,
        })
    }

    async fn reset_all(&self, cap: &AdminCapability) -> Result<RateLimitResetResult> {
        let ids = self.identities.list_identity_ids()?;
        let count = self.rate_limits.reset_all(&ids).await?;
        self.identities
            .record_limit_reset(ids, None, Utc::now())
            .await?;
        info!("{} reset search quotas of {} users", cap.actor_id(), count);

        Ok(RateLimitResetResult {
            success: true,
            message: format!("Successfully reset rate limits for {} users", count),
            affected_users: count,
        })
    }

    async fn set_universal_limit(
        &self,
        cap: &AdminCapability,
        search_limit: u32,
    ) -> Result<RateLimitResetResult> {
        let ids = self.identities.list_identity_ids()?;
        let count = self
            .rate_limits
            .set_universal_ceiling(&ids, search_limit)
            .await?;
        self.identities
            .record_limit_reset(ids, Some(search_limit), Utc::now())
            .await?;
        info!(
            "{} set universal search limit of {} for {} users",
            cap.actor_id(),
            search_limit,
            count
        );

        Ok(RateLimitResetResult {
            success: true,
            message: format!(
                "Successfully set universal limit of {} for {} users",
                search_limit, count
            ),
            affected_users: count,
        })
    }
}
