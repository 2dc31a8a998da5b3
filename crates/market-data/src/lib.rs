//! Stockwatch Market Data Crate
//!
//! This crate answers one question for the rest of Stockwatch: does a ticker
//! exist, and if so what is the company called and what does it trade at.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  TickerResolver  |  (normalize, auto-detect market, fallback)
//! +------------------+
//!          |
//!          v
//! +----------------------+     +------------------+
//! | TickerLookupProvider | --> |  TickerProfile   |  (normalized per provider)
//! +----------------------+     +------------------+
//!   Yahoo / Finnhub / Static
//!          |
//!          v
//! +------------------+
//! | ValidationResult |  (is_valid, name, price, source tag)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`TickerResolver`] - Provider chain, implements [`TickerValidator`]
//! - [`TickerLookupProvider`] - One external (or static) lookup source
//! - [`TickerProfile`] - Provider-normalized lookup result
//! - [`ValidationResult`] / [`ValidationSource`] - What callers receive

pub mod errors;
pub mod models;
pub mod provider;
pub mod resolver;

pub use errors::MarketDataError;
pub use models::{ProviderId, TickerProfile, ValidationResult, ValidationSource};
pub use provider::finnhub::FinnhubProvider;
pub use provider::static_catalog::StaticProvider;
pub use provider::yahoo::YahooProvider;
pub use provider::TickerLookupProvider;
pub use resolver::{
    has_recognized_suffix, normalize_symbol, Market, TickerResolver, TickerValidator,
    DEFAULT_ATTEMPT_TIMEOUT, RECOGNIZED_SUFFIXES,
};
