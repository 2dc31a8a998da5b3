use rust_decimal::Decimal;
use serde::Serialize;
use stockwatch_market_data::{ValidationResult, ValidationSource};

use crate::stocks::Stock;

pub const MSG_FOUND: &str = "Stock found in our system";
pub const MSG_VALID_UNREGISTERED: &str = "Valid ticker but not in our system";
pub const MSG_INVALID: &str = "Invalid ticker";
pub const MSG_TICKER_NOT_FOUND: &str = "Ticker not found";

/// Answer to a user search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockSearchResult {
    /// Whether the ticker is in the registry.
    pub found: bool,
    pub ticker: String,
    pub stock: Option<Stock>,
    pub company_name: Option<String>,
    pub current_price: Option<Decimal>,
    pub is_valid_ticker: bool,
    pub remaining_searches: u32,
    pub message: String,
}

impl StockSearchResult {
    /// Registry data wins over provider data for display.
    pub fn registered(ticker: String, stock: Stock, remaining_searches: u32) -> Self {
        Self {
            found: true,
            ticker,
            company_name: Some(stock.company_name.clone()),
            current_price: stock.current_price,
            stock: Some(stock),
            is_valid_ticker: true,
            remaining_searches,
            message: MSG_FOUND.to_string(),
        }
    }

    pub fn unregistered(
        ticker: String,
        validation: ValidationResult,
        remaining_searches: u32,
    ) -> Self {
        if validation.is_valid {
            Self {
                found: false,
                ticker,
                stock: None,
                company_name: validation.company_name,
                current_price: validation.current_price,
                is_valid_ticker: true,
                remaining_searches,
                message: MSG_VALID_UNREGISTERED.to_string(),
            }
        } else {
            Self {
                found: false,
                ticker,
                stock: None,
                company_name: None,
                current_price: None,
                is_valid_ticker: false,
                remaining_searches,
                message: MSG_INVALID.to_string(),
            }
        }
    }
}

/// Answer to a plain ticker validation. Does not touch quotas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerValidationResponse {
    pub ticker: String,
    pub is_valid: bool,
    pub company_name: Option<String>,
    pub current_price: Option<Decimal>,
    pub source: Option<ValidationSource>,
    pub error: Option<String>,
}

impl TickerValidationResponse {
    pub fn new(ticker: String, validation: ValidationResult) -> Self {
        let error = (!validation.is_valid).then(|| MSG_TICKER_NOT_FOUND.to_string());
        Self {
            ticker,
            is_valid: validation.is_valid,
            company_name: validation.company_name,
            current_price: validation.current_price,
            source: validation.source,
            error,
        }
    }
}
