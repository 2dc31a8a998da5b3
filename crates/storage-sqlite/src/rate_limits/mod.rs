//! SQLite-backed quota store.

mod model;
mod store;

pub use model::RateLimitDB;
pub use store::SqliteRateLimitStore;
