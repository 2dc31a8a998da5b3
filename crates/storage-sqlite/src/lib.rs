//! SQLite storage implementation for Stockwatch.
//!
//! This crate provides every database-related piece using Diesel with SQLite.
//! It implements the repository and store traits defined in `stockwatch-core`
//! and contains:
//! - Database connection pooling and the single-writer actor
//! - Diesel migrations
//! - Repository implementations for stocks and identities
//! - The durable rate-limit store
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

mod utils;

// Repository implementations
pub mod identities;
pub mod rate_limits;
pub mod stocks;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

pub use identities::IdentityRepository;
pub use rate_limits::SqliteRateLimitStore;
pub use stocks::StockRepository;

// Re-export storage errors and conversion helpers
pub use errors::StorageError;

pub use stockwatch_core::errors::{DatabaseError, Error, Result};
