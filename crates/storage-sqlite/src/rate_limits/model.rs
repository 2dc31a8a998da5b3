use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;

use stockwatch_core::rate_limits::RateLimitRecord;

use crate::utils::count_from_db;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::rate_limits)]
#[diesel(primary_key(identity_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RateLimitDB {
    pub identity_id: String,
    pub ceiling: i64,
    pub remaining: i64,
    pub updated_at: NaiveDateTime,
}

impl From<RateLimitDB> for RateLimitRecord {
    fn from(db: RateLimitDB) -> Self {
        Self {
            identity_id: db.identity_id,
            ceiling: count_from_db(db.ceiling),
            remaining: count_from_db(db.remaining),
            updated_at: Utc.from_utc_datetime(&db.updated_at),
        }
    }
}
