use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use stockwatch_market_data::{normalize_symbol, TickerValidator};

use super::search_model::{StockSearchResult, TickerValidationResponse};
use super::search_traits::SearchServiceTrait;
use crate::access::Identity;
use crate::constants::LOOKUP_SYMBOL_MAX_LEN;
use crate::errors::{Error, Result, ValidationError};
use crate::rate_limits::RateLimitService;
use crate::stocks::StockRepositoryTrait;

pub struct SearchService {
    stocks: Arc<dyn StockRepositoryTrait>,
    validator: Arc<dyn TickerValidator>,
    rate_limits: RateLimitService,
}

impl SearchService {
    pub fn new(
        stocks: Arc<dyn StockRepositoryTrait>,
        validator: Arc<dyn TickerValidator>,
        rate_limits: RateLimitService,
    ) -> Self {
        Self {
            stocks,
            validator,
            rate_limits,
        }
    }
}

/// Normalizes a symbol for search or validation. Exchange suffixes are
/// allowed, so the bound is looser than for registered tickers.
pub fn normalize_lookup_symbol(raw: &str) -> Result<String> {
    let symbol = normalize_symbol(raw);
    let len = symbol.chars().count();
    if len == 0 || len > LOOKUP_SYMBOL_MAX_LEN {
        return Err(Error::Validation(ValidationError::Length {
            field: "ticker",
            min: 1,
            max: LOOKUP_SYMBOL_MAX_LEN,
        }));
    }
    Ok(symbol)
}

#[async_trait]
impl SearchServiceTrait for SearchService {
    async fn search(&self, identity: &Identity, ticker: &str) -> Result<StockSearchResult> {
        let ticker = normalize_lookup_symbol(ticker)?;

        let registered = self.stocks.get_stock(&ticker)?;
        // Always consulted, registry hit or not
        let validation = self.validator.validate(&ticker).await;

        // Charged only once resolution has finished, and only for valid tickers
        let remaining = if validation.is_valid {
            let outcome = self.rate_limits.decrement(&identity.id).await?;
            if !outcome.allowed {
                return Err(Error::QuotaExceeded {
                    identity_id: identity.id.clone(),
                });
            }
            outcome.remaining
        } else {
            self.rate_limits.get_remaining(&identity.id).await?
        };

        debug!(
            "Search {} by {}: registered={}, valid={}, remaining={}",
            ticker,
            identity.id,
            registered.is_some(),
            validation.is_valid,
            remaining
        );

        Ok(match registered {
            Some(stock) => StockSearchResult::registered(ticker, stock, remaining),
            None => StockSearchResult::unregistered(ticker, validation, remaining),
        })
    }

    async fn validate_ticker(
        &self,
        _identity: &Identity,
        ticker: &str,
    ) -> Result<TickerValidationResponse> {
        let ticker = normalize_lookup_symbol(ticker)?;
        let validation = self.validator.validate(&ticker).await;
        Ok(TickerValidationResponse::new(ticker, validation))
    }
}
