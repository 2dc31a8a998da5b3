//! SQLite storage implementation for the identity directory.

mod model;
mod repository;

pub use model::UserDB;
pub use repository::IdentityRepository;
