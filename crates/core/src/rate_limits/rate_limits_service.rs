use std::sync::Arc;

use log::debug;

use super::rate_limits_model::{DecrementOutcome, RateLimitRecord};
use super::rate_limits_traits::RateLimitStoreTrait;
use crate::errors::Result;

/// Search quota contract over a backing store.
///
/// Identities that were never initialized have a ceiling and remaining of 0;
/// absence is zero quota, never an error or an unlimited default.
#[derive(Clone)]
pub struct RateLimitService {
    store: Arc<dyn RateLimitStoreTrait>,
}

impl RateLimitService {
    pub fn new(store: Arc<dyn RateLimitStoreTrait>) -> Self {
        Self { store }
    }

    /// Sets remaining and ceiling to `ceiling`, overwriting any prior state.
    pub async fn initialize(&self, identity_id: &str, ceiling: u32) -> Result<()> {
        debug!("Initializing quota for {} to {}", identity_id, ceiling);
        self.store.put_limit(identity_id, ceiling).await
    }

    pub async fn get_record(&self, identity_id: &str) -> Result<Option<RateLimitRecord>> {
        self.store.get_record(identity_id).await
    }

    pub async fn get_remaining(&self, identity_id: &str) -> Result<u32> {
        Ok(self
            .store
            .get_record(identity_id)
            .await?
            .map(|r| r.remaining)
            .unwrap_or(0))
    }

    pub async fn get_ceiling(&self, identity_id: &str) -> Result<u32> {
        Ok(self
            .store
            .get_record(identity_id)
            .await?
            .map(|r| r.ceiling)
            .unwrap_or(0))
    }

    /// Consumes one search if any remain.
    pub async fn decrement(&self, identity_id: &str) -> Result<DecrementOutcome> {
        match self.store.decrement_if_positive(identity_id).await? {
            Some(remaining) => Ok(DecrementOutcome {
                allowed: true,
                remaining,
            }),
            None => {
                debug!("Quota exhausted for {}", identity_id);
                Ok(DecrementOutcome::denied())
            }
        }
    }

    /// Refills remaining to the ceiling. Returns false, changing nothing,
    /// when the ceiling is 0.
    pub async fn reset(&self, identity_id: &str) -> Result<bool> {
        Ok(self.store.reset_to_ceiling(identity_id).await?.is_some())
    }

    /// Resets each identity; returns how many were actually reset.
    pub async fn reset_all(&self, identity_ids: &[String]) -> Result<usize> {
        let mut count = 0;
        for id in identity_ids {
            if self.reset(id).await? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Sets ceiling and remaining to `ceiling` (a full reset).
    pub async fn set_ceiling(&self, identity_id: &str, ceiling: u32) -> Result<()> {
        self.store.put_limit(identity_id, ceiling).await
    }

    /// Sets the ceiling on every identity, including uninitialized ones.
    /// Returns the number processed, which is always `identity_ids.len()`.
    pub async fn set_universal_ceiling(&self, identity_ids: &[String], ceiling: u32) -> Result<usize> {
        for id in identity_ids {
            self.set_ceiling(id, ceiling).await?;
        }
        Ok(identity_ids.len())
    }
}
