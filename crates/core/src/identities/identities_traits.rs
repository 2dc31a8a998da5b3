use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::identities_model::IdentityRecord;
use crate::access::Identity;
use crate::errors::Result;

/// Trait for identity directory persistence.
#[async_trait]
pub trait IdentityRepositoryTrait: Send + Sync {
    fn get_identity(&self, identity_id: &str) -> Result<Option<IdentityRecord>>;

    fn list_identity_ids(&self) -> Result<Vec<String>>;

    /// Fails with `DatabaseError::UniqueViolation` if the id already exists.
    async fn insert_identity(&self, record: IdentityRecord) -> Result<IdentityRecord>;

    /// Mirrors a quota reset onto the directory: stamps `last_reset_at` and,
    /// when given, stores the new `search_limit`. Returns rows touched.
    async fn record_limit_reset(
        &self,
        identity_ids: Vec<String>,
        search_limit: Option<u32>,
        at: DateTime<Utc>,
    ) -> Result<usize>;
}

#[async_trait]
pub trait IdentityServiceTrait: Send + Sync {
    /// Registers a first-seen identity and grants it the default quota.
    async fn ensure_provisioned(&self, identity: &Identity) -> Result<IdentityRecord>;

    fn get_identity(&self, identity_id: &str) -> Result<Option<IdentityRecord>>;
}
