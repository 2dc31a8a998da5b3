use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::rate_limits_model::RateLimitRecord;
use super::rate_limits_traits::RateLimitStoreTrait;
use crate::errors::Result;

/// Process-local quota store.
///
/// Each primitive runs under the map's per-entry lock, so concurrent
/// decrements on one identity are serialized while different identities
/// proceed independently. State does not survive a restart.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    records: DashMap<String, RateLimitRecord>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateLimitStoreTrait for InMemoryRateLimitStore {
    async fn get_record(&self, identity_id: &str) -> Result<Option<RateLimitRecord>> {
        Ok(self.records.get(identity_id).map(|r| r.value().clone()))
    }

    async fn put_limit(&self, identity_id: &str, ceiling: u32) -> Result<()> {
        self.records.insert(
            identity_id.to_string(),
            RateLimitRecord {
                identity_id: identity_id.to_string(),
                ceiling,
                remaining: ceiling,
                updated_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn decrement_if_positive(&self, identity_id: &str) -> Result<Option<u32>> {
        let Some(mut record) = self.records.get_mut(identity_id) else {
            return Ok(None);
        };
        if record.remaining == 0 {
            return Ok(None);
        }
        record.remaining -= 1;
        record.updated_at = Utc::now();
        Ok(Some(record.remaining))
    }

    async fn reset_to_ceiling(&self, identity_id: &str) -> Result<Option<u32>> {
        let Some(mut record) = self.records.get_mut(identity_id) else {
            return Ok(None);
        };
        if record.ceiling == 0 {
            return Ok(None);
        }
        record.remaining = record.ceiling;
        record.updated_at = Utc::now();
        Ok(Some(record.ceiling))
    }
}
