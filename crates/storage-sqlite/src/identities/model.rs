//! Database models for the identity directory.

use std::str::FromStr;

use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;

use stockwatch_core::errors::Error;
use stockwatch_core::identities::IdentityRecord;
use stockwatch_core::Role;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub username: String,
    pub role: String,
    pub search_limit: i64,
    pub last_reset_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<UserDB> for IdentityRecord {
    type Error = Error;

    fn try_from(db: UserDB) -> Result<Self, Self::Error> {
        Ok(Self {
            role: Role::from_str(&db.role)?,
            search_limit: crate::utils::count_from_db(db.search_limit),
            last_reset_at: db.last_reset_at.map(|at| Utc.from_utc_datetime(&at)),
            created_at: Utc.from_utc_datetime(&db.created_at),
            id: db.id,
            username: db.username,
        })
    }
}

impl From<&IdentityRecord> for UserDB {
    fn from(record: &IdentityRecord) -> Self {
        Self {
            id: record.id.clone(),
            username: record.username.clone(),
            role: record.role.as_str().to_string(),
            search_limit: i64::from(record.search_limit),
            last_reset_at: record.last_reset_at.map(|at| at.naive_utc()),
            created_at: record.created_at.naive_utc(),
        }
    }
}
