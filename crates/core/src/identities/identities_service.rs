use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};

use super::identities_model::IdentityRecord;
use super::identities_traits::{IdentityRepositoryTrait, IdentityServiceTrait};
use crate::access::Identity;
use crate::errors::{DatabaseError, Error, Result};
use crate::rate_limits::RateLimitService;

pub struct IdentityService {
    repository: Arc<dyn IdentityRepositoryTrait>,
    rate_limits: RateLimitService,
    default_search_limit: u32,
}

impl IdentityService {
    pub fn new(
        repository: Arc<dyn IdentityRepositoryTrait>,
        rate_limits: RateLimitService,
        default_search_limit: u32,
    ) -> Self {
        Self {
            repository,
            rate_limits,
            default_search_limit,
        }
    }

    /// Initializes the store from the directory's `search_limit` when the
    /// identity has no store record. A process-local store comes back empty
    /// after a restart.
    async fn restore_missing_quota(&self, existing: &IdentityRecord) -> Result<()> {
        if self.rate_limits.get_record(&existing.id).await?.is_some() {
            return Ok(());
        }
        info!(
            "Restoring quota for {} from directory: {}",
            existing.id, existing.search_limit
        );
        self.rate_limits
            .initialize(&existing.id, existing.search_limit)
            .await
    }
}

#[async_trait]
impl IdentityServiceTrait for IdentityService {
    async fn ensure_provisioned(&self, identity: &Identity) -> Result<IdentityRecord> {
        if let Some(existing) = self.repository.get_identity(&identity.id)? {
            self.restore_missing_quota(&existing).await?;
            return Ok(existing);
        }

        let record = IdentityRecord::provisioned(identity, self.default_search_limit, Utc::now());
        let inserted = match self.repository.insert_identity(record).await {
            Ok(inserted) => inserted,
            Err(Error::Database(DatabaseError::UniqueViolation(_))) => {
                // Lost the insert race; the winner's quota write may not have landed yet
                debug!("Identity {} provisioned concurrently", identity.id);
                let existing = self
                    .repository
                    .get_identity(&identity.id)?
                    .ok_or_else(|| Error::not_found("Identity", identity.id.clone()))?;
                self.restore_missing_quota(&existing).await?;
                return Ok(existing);
            }
            Err(e) => return Err(e),
        };

        self.rate_limits
            .initialize(&identity.id, self.default_search_limit)
            .await?;
        info!(
            "Provisioned identity {} ({}) with {} searches",
            inserted.id, inserted.username, inserted.search_limit
        );
        Ok(inserted)
    }

    fn get_identity(&self, identity_id: &str) -> Result<Option<IdentityRecord>> {
        self.repository.get_identity(identity_id)
    }
}
