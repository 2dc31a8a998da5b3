//! Provider-agnostic models shared by providers and the resolver.

mod profile;
mod validation;

pub use profile::{price_from_f64, TickerProfile};
pub use validation::{ValidationResult, ValidationSource};

/// Provider identifier (e.g., "YAHOO", "FINNHUB").
pub type ProviderId = &'static str;
