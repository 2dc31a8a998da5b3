use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use stockwatch_core::identities::{IdentityRecord, IdentityRepositoryTrait};
use stockwatch_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;
use crate::schema::users::dsl::*;

pub struct IdentityRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl IdentityRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        IdentityRepository { pool, writer }
    }
}

#[async_trait]
impl IdentityRepositoryTrait for IdentityRepository {
    fn get_identity(&self, identity_id: &str) -> Result<Option<IdentityRecord>> {
        let mut conn = get_connection(&self.pool)?;
        users
            .find(identity_id)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(IdentityRecord::try_from)
            .transpose()
    }

    fn list_identity_ids(&self) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users
            .select(id)
            .order(id.asc())
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?)
    }

    async fn insert_identity(&self, record: IdentityRecord) -> Result<IdentityRecord> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<IdentityRecord> {
                let row = UserDB::from(&record);
                let inserted = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                IdentityRecord::try_from(inserted)
            })
            .await
    }

    async fn record_limit_reset(
        &self,
        identity_ids: Vec<String>,
        new_limit: Option<u32>,
        at: DateTime<Utc>,
    ) -> Result<usize> {
        if identity_ids.is_empty() {
            return Ok(0);
        }
        let stamp = at.naive_utc();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let target = users.filter(id.eq_any(&identity_ids));
                let touched = match new_limit {
                    Some(limit) => diesel::update(target)
                        .set((
                            search_limit.eq(i64::from(limit)),
                            last_reset_at.eq(Some(stamp)),
                        ))
                        .execute(conn),
                    None => diesel::update(target)
                        .set(last_reset_at.eq(Some(stamp)))
                        .execute(conn),
                };
                Ok(touched.map_err(StorageError::from)?)
            })
            .await
    }
}
