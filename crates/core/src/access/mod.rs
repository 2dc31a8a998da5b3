//! Access module - caller identity and the administrative capability gate.

mod access_model;

pub use access_model::{AdminCapability, Identity, Role};
