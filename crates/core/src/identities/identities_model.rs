use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::{Identity, Role};

/// Directory entry for an identity.
///
/// `search_limit` and `last_reset_at` mirror the quota store for reporting;
/// the store stays authoritative for remaining searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub search_limit: u32,
    pub last_reset_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl IdentityRecord {
    pub fn provisioned(identity: &Identity, search_limit: u32, now: DateTime<Utc>) -> Self {
        Self {
            id: identity.id.clone(),
            username: identity.username.clone(),
            role: identity.role,
            search_limit,
            last_reset_at: None,
            created_at: now,
        }
    }
}
