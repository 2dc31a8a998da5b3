//! Yahoo Finance ticker lookup provider.
//!
//! Lookups go through the quoteSummary API first (crumb/cookie
//! authenticated). When that path fails for any reason other than an
//! unknown symbol, the `yahoo_finance_api` connector is used instead:
//! exact-symbol search for the name, latest daily quote for the price.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{price_from_f64, TickerProfile};
use crate::provider::TickerLookupProvider;

use models::{YahooPriceData, YahooQuoteSummaryResponse};

const PROVIDER_ID: &str = "YAHOO";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance ticker lookup provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    client: Client,
    crumb: RwLock<Option<CrumbData>>,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new(timeout: Duration) -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(MarketDataError::Network)?;

        Ok(Self {
            connector,
            client,
            crumb: RwLock::new(None),
        })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        if let Some(crumb) = self.crumb.read().await.as_ref() {
            return Ok(crumb.clone());
        }

        let fresh = self.fetch_crumb().await?;
        *self.crumb.write().await = Some(fresh.clone());
        Ok(fresh)
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Step 1: Get cookie from fc.yahoo.com
        let response = self
            .client
            .get("https://fc.yahoo.com")
            .send()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to get cookie: {}", e),
            })?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "Failed to parse Yahoo cookie".to_string(),
            })?;

        // Step 2: Get crumb using cookie
        let crumb = self
            .client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to get crumb: {}", e),
            })?
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read crumb: {}", e),
            })?;

        Ok(CrumbData { cookie, crumb })
    }

    /// Clear the cached crumb (used when authentication fails)
    async fn clear_crumb(&self) {
        *self.crumb.write().await = None;
    }

    // ========================================================================
    // Lookup Paths
    // ========================================================================

    /// Look the symbol up through the quoteSummary `price` module.
    async fn lookup_quote_summary(&self, symbol: &str) -> Result<TickerProfile, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules=price&crumb={}",
            encode(symbol),
            encode(&crumb.crumb)
        );

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: format!("quoteSummary request failed: {}", e),
                    }
                }
            })?;

        match response.status() {
            reqwest::StatusCode::UNAUTHORIZED => {
                self.clear_crumb().await;
                return Err(MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: "Yahoo authentication expired".to_string(),
                });
            }
            reqwest::StatusCode::NOT_FOUND => {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            status if !status.is_success() => {
                return Err(MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("HTTP {}", status),
                });
            }
            _ => {}
        }

        let body = response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read quoteSummary response: {}", e),
            })?;

        parse_quote_summary(symbol, &body)
    }

    /// Look the symbol up through the connector (search + latest quote).
    async fn lookup_connector(&self, symbol: &str) -> Result<TickerProfile, MarketDataError> {
        let result = self
            .connector
            .search_ticker(&encode(symbol))
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        let item = result
            .quotes
            .iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(symbol))
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        let name = display_name(Some(&item.long_name), Some(&item.short_name))
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        let price = match self.connector.get_latest_quotes(symbol, "1d").await {
            Ok(response) => match response.last_quote() {
                Ok(quote) => price_from_f64(quote.close),
                Err(e) => {
                    debug!("No latest quote for {}: {}", symbol, e);
                    None
                }
            },
            Err(e) => {
                debug!("Latest quote request failed for {}: {}", symbol, e);
                None
            }
        };

        Ok(TickerProfile::new(symbol, Some(name), price))
    }
}

/// Picks `longName`, falling back to `shortName`. Blank strings count as absent.
fn display_name(long_name: Option<&String>, short_name: Option<&String>) -> Option<String> {
    [long_name, short_name]
        .into_iter()
        .flatten()
        .map(|name| name.trim())
        .find(|name| !name.is_empty())
        .map(str::to_string)
}

fn profile_from_price(symbol: &str, price: &YahooPriceData) -> Result<TickerProfile, MarketDataError> {
    let name = display_name(price.long_name.as_ref(), price.short_name.as_ref())
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

    let current_price = price
        .regular_market_price
        .as_ref()
        .and_then(|p| p.raw)
        .and_then(price_from_f64);

    Ok(TickerProfile::new(symbol, Some(name), current_price))
}

fn parse_quote_summary(symbol: &str, body: &str) -> Result<TickerProfile, MarketDataError> {
    let data: YahooQuoteSummaryResponse =
        serde_json::from_str(body).map_err(|e| MarketDataError::MalformedResponse {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse quoteSummary response: {}", e),
        })?;

    if let Some(error) = data.quote_summary.error.as_ref() {
        debug!(
            "quoteSummary error for {}: {:?} {:?}",
            symbol, error.code, error.description
        );
    }

    let price = data
        .price()
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

    profile_from_price(symbol, price)
}

#[async_trait]
impl TickerLookupProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn lookup(&self, symbol: &str) -> Result<TickerProfile, MarketDataError> {
        match self.lookup_quote_summary(symbol).await {
            Ok(profile) => Ok(profile),
            Err(e) if e.is_not_found() => Err(e),
            Err(e) => {
                warn!(
                    "quoteSummary failed for {}: {}, trying connector lookup",
                    symbol, e
                );
                self.lookup_connector(symbol).await
            }
        }
    }
}
