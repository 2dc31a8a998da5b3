#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    use crate::errors::Result;
    use crate::identities::{
        IdentityRecord, IdentityRepositoryTrait, IdentityService, IdentityServiceTrait,
    };
    use crate::rate_limits::{InMemoryRateLimitStore, RateLimitService};
    use crate::test_support::{user, MockIdentityRepository};

    /// Hides its records from the first lookup, as if another request
    /// inserted the identity between our lookup and our insert.
    struct ConcurrentlyInsertedRepository {
        inner: MockIdentityRepository,
        first_lookup_done: AtomicBool,
    }

    #[async_trait]
    impl IdentityRepositoryTrait for ConcurrentlyInsertedRepository {
        fn get_identity(&self, identity_id: &str) -> Result<Option<IdentityRecord>> {
            if !self.first_lookup_done.swap(true, Ordering::SeqCst) {
                return Ok(None);
            }
            self.inner.get_identity(identity_id)
        }

        fn list_identity_ids(&self) -> Result<Vec<String>> {
            self.inner.list_identity_ids()
        }

        async fn insert_identity(&self, record: IdentityRecord) -> Result<IdentityRecord> {
            self.inner.insert_identity(record).await
        }

        async fn record_limit_reset(
            &self,
            identity_ids: Vec<String>,
            search_limit: Option<u32>,
            at: DateTime<Utc>,
        ) -> Result<usize> {
            self.inner
                .record_limit_reset(identity_ids, search_limit, at)
                .await
        }
    }

    fn setup() -> (MockIdentityRepository, RateLimitService, IdentityService) {
        let repo = MockIdentityRepository::new();
        let limits = RateLimitService::new(Arc::new(InMemoryRateLimitStore::new()));
        let service = IdentityService::new(Arc::new(repo.clone()), limits.clone(), 50);
        (repo, limits, service)
    }

    #[tokio::test]
    async fn test_first_sight_provisions_default_quota() {
        let (repo, limits, service) = setup();

        let record = service.ensure_provisioned(&user("u1")).await.unwrap();

        assert_eq!(record.search_limit, 50);
        assert_eq!(repo.record("u1").username, "user-u1");
        assert_eq!(limits.get_remaining("u1").await.unwrap(), 50);
    }

    #[tokio::test]
    async fn test_second_sight_keeps_consumed_quota() {
        let (_, limits, service) = setup();
        service.ensure_provisioned(&user("u1")).await.unwrap();
        limits.decrement("u1").await.unwrap();

        service.ensure_provisioned(&user("u1")).await.unwrap();

        assert_eq!(limits.get_remaining("u1").await.unwrap(), 49);
    }

    #[tokio::test]
    async fn test_known_identity_with_empty_store_is_restored_from_directory() {
        let (repo, limits, service) = setup();
        repo.add(&user("u1"), 7);

        service.ensure_provisioned(&user("u1")).await.unwrap();

        assert_eq!(limits.get_ceiling("u1").await.unwrap(), 7);
        assert_eq!(limits.get_remaining("u1").await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_exhausted_quota_is_not_refilled() {
        let (_, limits, service) = setup();
        service.ensure_provisioned(&user("u1")).await.unwrap();
        limits.set_ceiling("u1", 0).await.unwrap();

        service.ensure_provisioned(&user("u1")).await.unwrap();

        assert_eq!(limits.get_remaining("u1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_losing_insert_race_still_grants_quota() {
        let inner = MockIdentityRepository::new();
        // The winner's directory row exists but its quota write has not landed
        inner.add(&user("u1"), 50);
        let repo = ConcurrentlyInsertedRepository {
            inner,
            first_lookup_done: AtomicBool::new(false),
        };
        let limits = RateLimitService::new(Arc::new(InMemoryRateLimitStore::new()));
        let service = IdentityService::new(Arc::new(repo), limits.clone(), 50);

        let record = service.ensure_provisioned(&user("u1")).await.unwrap();

        assert_eq!(record.search_limit, 50);
        assert_eq!(limits.get_ceiling("u1").await.unwrap(), 50);
        let outcome = limits.decrement("u1").await.unwrap();
        assert!(outcome.allowed);
        assert_eq!(outcome.remaining, 49);
    }
}
