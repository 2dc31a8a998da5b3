//! Ticker lookup providers.
//!
//! - [`yahoo::YahooProvider`]: primary source
//! - [`finnhub::FinnhubProvider`]: fallback source, requires an API key
//! - [`static_catalog::StaticProvider`]: fixed in-process catalog for
//!   development and tests

mod traits;

pub mod finnhub;
pub mod static_catalog;
pub mod yahoo;

pub use traits::TickerLookupProvider;
