//! Finnhub ticker lookup provider.
//!
//! Uses two endpoints:
//! - `/stock/profile2` for the company name (required)
//! - `/quote` for the current price (optional)
//!
//! Finnhub free tier is limited to 60 API calls per minute.
//! API documentation: https://finnhub.io/docs/api

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{price_from_f64, TickerProfile};
use crate::provider::TickerLookupProvider;

const BASE_URL: &str = "https://finnhub.io/api/v1";
const PROVIDER_ID: &str = "FINNHUB";

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from /quote endpoint
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    /// Current price
    c: Option<f64>,
    // Note: h, l, o, pc, t exist but are not used for validation
}

/// Response from /stock/profile2 endpoint.
///
/// Unknown symbols come back as an empty object.
#[derive(Debug, Deserialize)]
struct ProfileResponse {
    /// Company name
    name: Option<String>,
}

/// Error response from Finnhub
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

// ============================================================================
// FinnhubProvider
// ============================================================================

/// Finnhub ticker lookup provider.
pub struct FinnhubProvider {
    client: Client,
    api_key: String,
}

impl FinnhubProvider {
    /// Create a new Finnhub provider with the given API key and request timeout.
    pub fn new(api_key: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Make a GET request to the Finnhub API.
    async fn fetch(&self, endpoint: &str, symbol: &str) -> Result<String, MarketDataError> {
        let url = format!("{}{}", BASE_URL, endpoint);

        debug!("Finnhub request: {} for {}", endpoint, symbol);

        let response = self
            .client
            .get(&url)
            .header("X-Finnhub-Token", &self.api_key)
            .query(&[("symbol", symbol)])
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
                        message: format!("Request failed: {}", e),
                    }
                }
            })?;

        let status = response.status();

        // 403 is what Finnhub returns once the key's quota is exhausted
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "Invalid or missing API key".to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if let Ok(ErrorResponse { error: Some(msg) }) = serde_json::from_str(&body) {
                return Err(MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: msg,
                });
            }

            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })
    }

    async fn fetch_company_name(&self, symbol: &str) -> Result<String, MarketDataError> {
        let text = self.fetch("/stock/profile2", symbol).await?;
        parse_profile_name(symbol, &text)
    }

    async fn fetch_price(&self, symbol: &str) -> Result<Option<rust_decimal::Decimal>, MarketDataError> {
        let text = self.fetch("/quote", symbol).await?;
        parse_quote_price(&text)
    }
}

fn parse_profile_name(symbol: &str, body: &str) -> Result<String, MarketDataError> {
    let profile: ProfileResponse =
        serde_json::from_str(body).map_err(|e| MarketDataError::MalformedResponse {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse profile response: {}", e),
        })?;

    profile
        .name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
}

fn parse_quote_price(body: &str) -> Result<Option<rust_decimal::Decimal>, MarketDataError> {
    let quote: QuoteResponse =
        serde_json::from_str(body).map_err(|e| MarketDataError::MalformedResponse {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse quote response: {}", e),
        })?;

    // Finnhub returns 0 for unknown symbols instead of an error
    Ok(quote.c.and_then(price_from_f64))
}

#[async_trait]
impl TickerLookupProvider for FinnhubProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn lookup(&self, symbol: &str) -> Result<TickerProfile, MarketDataError> {
        let name = self.fetch_company_name(symbol).await?;

        // The quote is best-effort; a known company without a price is still valid
        let price = match self.fetch_price(symbol).await {
            Ok(price) => price,
            Err(e) => {
                debug!("Finnhub quote unavailable for {}: {}", symbol, e);
                None
            }
        };

        Ok(TickerProfile::new(symbol, Some(name), price))
    }
}
