use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use stockwatch_core::rate_limits::{RateLimitRecord, RateLimitStoreTrait};
use stockwatch_core::Result;

use super::model::RateLimitDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::rate_limits;
use crate::schema::rate_limits::dsl::*;
use crate::utils::count_from_db;

/// Durable quota store.
///
/// Every conditional update is a single `UPDATE ... WHERE ... RETURNING`
/// statement, so the check and the write cannot be separated even if more
/// than one process shares the database file.
pub struct SqliteRateLimitStore {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl SqliteRateLimitStore {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        SqliteRateLimitStore { pool, writer }
    }
}

#[async_trait]
impl RateLimitStoreTrait for SqliteRateLimitStore {
    async fn get_record(&self, key: &str) -> Result<Option<RateLimitRecord>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(rate_limits
            .find(key)
            .select(RateLimitDB::as_select())
            .first::<RateLimitDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(RateLimitRecord::from))
    }

    async fn put_limit(&self, key: &str, new_ceiling: u32) -> Result<()> {
        let row = RateLimitDB {
            identity_id: key.to_string(),
            ceiling: i64::from(new_ceiling),
            remaining: i64::from(new_ceiling),
            updated_at: Utc::now().naive_utc(),
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::insert_into(rate_limits::table)
                    .values(&row)
                    .on_conflict(identity_id)
                    .do_update()
                    .set((
                        ceiling.eq(row.ceiling),
                        remaining.eq(row.remaining),
                        updated_at.eq(row.updated_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn decrement_if_positive(&self, key: &str) -> Result<Option<u32>> {
        let key = key.to_string();
        let now = Utc::now().naive_utc();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<u32>> {
                let left = diesel::update(
                    rate_limits
                        .filter(identity_id.eq(&key))
                        .filter(remaining.gt(0)),
                )
                .set((remaining.eq(remaining - 1), updated_at.eq(now)))
                .returning(remaining)
                .get_result::<i64>(conn)
                .optional()
                .map_err(StorageError::from)?;
                Ok(left.map(count_from_db))
            })
            .await
    }

    async fn reset_to_ceiling(&self, key: &str) -> Result<Option<u32>> {
        let key = key.to_string();
        let now = Utc::now().naive_utc();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<u32>> {
                let restored = diesel::update(
                    rate_limits
                        .filter(identity_id.eq(&key))
                        .filter(ceiling.gt(0)),
                )
                .set((remaining.eq(ceiling), updated_at.eq(now)))
                .returning(ceiling)
                .get_result::<i64>(conn)
                .optional()
                .map_err(StorageError::from)?;
                Ok(restored.map(count_from_db))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::setup_db;
    use stockwatch_core::rate_limits::RateLimitService;

    #[tokio::test]
    async fn decrement_stops_at_zero() {
        let (pool, writer, _dir) = setup_db();
        let store = SqliteRateLimitStore::new(pool, writer);

        assert_eq!(store.decrement_if_positive("u1").await.unwrap(), None);

        store.put_limit("u1", 2).await.unwrap();
        assert_eq!(store.decrement_if_positive("u1").await.unwrap(), Some(1));
        assert_eq!(store.decrement_if_positive("u1").await.unwrap(), Some(0));
        assert_eq!(store.decrement_if_positive("u1").await.unwrap(), None);

        let record = store.get_record("u1").await.unwrap().unwrap();
        assert_eq!(record.ceiling, 2);
        assert_eq!(record.remaining, 0);
    }

    #[tokio::test]
    async fn put_limit_overwrites_and_refills() {
        let (pool, writer, _dir) = setup_db();
        let store = SqliteRateLimitStore::new(pool, writer);

        store.put_limit("u1", 5).await.unwrap();
        store.decrement_if_positive("u1").await.unwrap();
        store.put_limit("u1", 3).await.unwrap();

        let record = store.get_record("u1").await.unwrap().unwrap();
        assert_eq!((record.ceiling, record.remaining), (3, 3));
    }

    #[tokio::test]
    async fn reset_skips_absent_and_zero_ceiling_records() {
        let (pool, writer, _dir) = setup_db();
        let store = SqliteRateLimitStore::new(pool, writer);

        assert_eq!(store.reset_to_ceiling("ghost").await.unwrap(), None);

        store.put_limit("zero", 0).await.unwrap();
        assert_eq!(store.reset_to_ceiling("zero").await.unwrap(), None);

        store.put_limit("u1", 4).await.unwrap();
        store.decrement_if_positive("u1").await.unwrap();
        assert_eq!(store.reset_to_ceiling("u1").await.unwrap(), Some(4));
        assert_eq!(store.get_record("u1").await.unwrap().unwrap().remaining, 4);
    }

    #[tokio::test]
    async fn concurrent_decrements_never_oversell() {
        let (pool, writer, _dir) = setup_db();
        let service = RateLimitService::new(Arc::new(SqliteRateLimitStore::new(pool, writer)));
        service.initialize("u1", 10).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..30 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.decrement("u1").await.unwrap().allowed
            }));
        }

        let mut allowed = 0;
        for handle in handles {
            if handle.await.unwrap() {
                allowed += 1;
            }
        }
        assert_eq!(allowed, 10);
        assert_eq!(service.get_remaining("u1").await.unwrap(), 0);
    }
}
