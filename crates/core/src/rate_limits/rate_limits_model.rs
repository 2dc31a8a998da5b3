//! Rate limit domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quota state of one identity in the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitRecord {
    pub identity_id: String,
    pub ceiling: u32,
    /// Normally `0 ..= ceiling`; only decrements and resets move it.
    pub remaining: u32,
    pub updated_at: DateTime<Utc>,
}

/// Result of a quota decrement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecrementOutcome {
    pub allowed: bool,
    /// Remaining quota after the attempt. Always 0 when `allowed` is false.
    pub remaining: u32,
}

impl DecrementOutcome {
    pub fn denied() -> Self {
        Self {
            allowed: false,
            remaining: 0,
        }
    }
}

/// Quota overview for one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    pub user_id: String,
    pub username: String,
    pub search_limit: u32,
    pub searches_used: u32,
    pub remaining_searches: u32,
    pub last_reset_at: Option<DateTime<Utc>>,
}

/// Input for setting a ceiling, for one identity or for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitUpdate {
    pub search_limit: u32,
}

/// Outcome of a reset or bulk ceiling change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitResetResult {
    pub success: bool,
    pub message: String,
    pub affected_users: usize,
}
