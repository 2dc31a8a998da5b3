//! Fixed in-process ticker catalog.
//!
//! Used for local development without network access and by tests. Symbols
//! are exchange-qualified the same way Yahoo qualifies them, so suffix
//! auto-detection behaves identically against this provider.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::TickerProfile;
use crate::provider::TickerLookupProvider;

const PROVIDER_ID: &str = "STATIC";

/// (symbol, company name, price in minor units of 0.01)
const DEFAULT_CATALOG: &[(&str, &str, i64)] = &[
    ("AAPL", "Apple Inc.", 17550),
    ("MSFT", "Microsoft Corporation", 38000),
    ("GOOGL", "Alphabet Inc.", 14025),
    ("AMZN", "Amazon.com Inc.", 15000),
    ("TSLA", "Tesla Inc.", 24500),
    ("META", "Meta Platforms Inc.", 35000),
    ("NVDA", "NVIDIA Corporation", 50000),
    ("RELIANCE.NS", "Reliance Industries Limited", 245075),
    ("TCS.NS", "Tata Consultancy Services Limited", 375000),
    ("INFY.NS", "Infosys Limited", 145050),
    ("HDFCBANK.NS", "HDFC Bank Limited", 168025),
    ("ICICIBANK.NS", "ICICI Bank Limited", 95075),
    ("SBIN.NS", "State Bank of India", 62500),
    ("ITC.NS", "ITC Limited", 42550),
    ("WIPRO.NS", "Wipro Limited", 45000),
    ("BHARTIARTL.NS", "Bharti Airtel Limited", 90000),
    ("HINDUNILVR.NS", "Hindustan Unilever Limited", 265000),
    ("RELIANCE.BO", "Reliance Industries Limited", 245075),
    ("TCS.BO", "Tata Consultancy Services Limited", 375000),
    ("INFY.BO", "Infosys Limited", 145050),
];

/// Ticker lookup against a fixed catalog.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    entries: HashMap<String, (String, Option<Decimal>)>,
}

impl StaticProvider {
    /// Provider with the built-in catalog of US, NSE and BSE tickers.
    pub fn new() -> Self {
        let entries = DEFAULT_CATALOG
            .iter()
            .map(|(symbol, name, cents)| {
                (
                    symbol.to_string(),
                    (name.to_string(), Some(Decimal::new(*cents, 2))),
                )
            })
            .collect();
        Self { entries }
    }

    /// Provider with no entries; add them with [`with_entry`](Self::with_entry).
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn with_entry(
        mut self,
        symbol: impl Into<String>,
        company_name: impl Into<String>,
        price: Option<Decimal>,
    ) -> Self {
        self.entries
            .insert(symbol.into(), (company_name.into(), price));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StaticProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TickerLookupProvider for StaticProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn lookup(&self, symbol: &str) -> Result<TickerProfile, MarketDataError> {
        self.entries
            .get(symbol)
            .map(|(name, price)| TickerProfile::new(symbol, Some(name.clone()), *price))
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }
}
