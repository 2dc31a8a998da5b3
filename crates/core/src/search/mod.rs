//! Search module - rate-limited ticker search composed from the registry,
//! the ticker validator and the quota service.

mod search_model;
mod search_service;
mod search_traits;

#[cfg(test)]
mod search_service_tests;

pub use search_model::{StockSearchResult, TickerValidationResponse};
pub use search_service::{normalize_lookup_symbol, SearchService};
pub use search_traits::SearchServiceTrait;
