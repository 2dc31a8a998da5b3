//! Stocks module - the registry of tracked tickers and their category lifecycle.

mod stocks_model;
mod stocks_service;
mod stocks_traits;

#[cfg(test)]
mod stocks_model_tests;

#[cfg(test)]
mod stocks_service_tests;

pub use stocks_model::{
    apply_update, normalize_ticker, NewStock, StateChange, Stock, StockCategory, StockListing,
    StockSubcategory, StockUpdate,
};
pub use stocks_service::StockService;
pub use stocks_traits::{StockMutation, StockRepositoryTrait, StockServiceTrait};
