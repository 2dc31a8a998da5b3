//! Ticker resolution.
//!
//! [`TickerResolver`] walks the provider chain for a symbol and always
//! produces a [`ValidationResult`](crate::models::ValidationResult); provider
//! failures stop at this boundary.

mod exchange_suffixes;
mod ticker_resolver;

pub use exchange_suffixes::{
    has_recognized_suffix, normalize_symbol, Market, RECOGNIZED_SUFFIXES,
};
pub use ticker_resolver::{TickerResolver, TickerValidator, DEFAULT_ATTEMPT_TIMEOUT};
