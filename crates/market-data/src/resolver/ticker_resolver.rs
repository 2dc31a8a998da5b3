use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::exchange_suffixes::{has_recognized_suffix, normalize_symbol, Market};
use crate::models::{TickerProfile, ValidationResult, ValidationSource};
use crate::provider::TickerLookupProvider;

/// Upper bound for a single provider attempt.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

/// Validates tickers against external sources.
///
/// Implementations never fail: anything that goes wrong while talking to a
/// provider yields an invalid result.
#[async_trait]
pub trait TickerValidator: Send + Sync {
    async fn validate(&self, ticker: &str) -> ValidationResult;
}

/// Primary provider, market auto-detection, then optional fallback provider.
///
/// Resolution order for a normalized ticker `T`:
/// 1. primary provider on `T`
/// 2. if `T` has no recognized suffix and auto-detection is on: primary on
///    `T.NS`, then `T.BO`
/// 3. fallback provider on `T`, when one is configured
///
/// The first attempt returning a named profile wins.
pub struct TickerResolver {
    primary: Arc<dyn TickerLookupProvider>,
    fallback: Option<Arc<dyn TickerLookupProvider>>,
    auto_detect_markets: bool,
    attempt_timeout: Duration,
}

impl TickerResolver {
    pub fn new(primary: Arc<dyn TickerLookupProvider>) -> Self {
        Self {
            primary,
            fallback: None,
            auto_detect_markets: true,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    /// Adds a fallback provider. Only call this when its credential is configured.
    pub fn with_fallback(mut self, fallback: Arc<dyn TickerLookupProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_auto_detect_markets(mut self, enabled: bool) -> Self {
        self.auto_detect_markets = enabled;
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Runs one isolated lookup. Errors, timeouts and nameless profiles all
    /// come back as `None`.
    async fn attempt(
        &self,
        provider: &dyn TickerLookupProvider,
        symbol: &str,
    ) -> Option<TickerProfile> {
        match tokio::time::timeout(self.attempt_timeout, provider.lookup(symbol)).await {
            Ok(Ok(profile)) if profile.has_display_name() => Some(profile),
            Ok(Ok(_)) => {
                debug!("{} returned no display name for {}", provider.id(), symbol);
                None
            }
            Ok(Err(e)) => {
                debug!("{} lookup failed for {}: {}", provider.id(), symbol, e);
                None
            }
            Err(_) => {
                warn!(
                    "{} lookup for {} timed out after {:?}",
                    provider.id(),
                    symbol,
                    self.attempt_timeout
                );
                None
            }
        }
    }

    async fn resolve(&self, ticker: &str) -> ValidationResult {
        let primary = self.primary.as_ref();

        if let Some(profile) = self.attempt(primary, ticker).await {
            return ValidationResult::from_profile(
                profile,
                ValidationSource::Primary {
                    provider: primary.id(),
                },
            );
        }

        if self.auto_detect_markets && !has_recognized_suffix(ticker) {
            for market in Market::AUTO_DETECT_ORDER {
                let qualified = market.qualify(ticker);
                if let Some(profile) = self.attempt(primary, &qualified).await {
                    info!("Resolved {} as {} on {}", ticker, qualified, market.code());
                    return ValidationResult::from_profile(
                        profile,
                        ValidationSource::PrimaryMarket {
                            provider: primary.id(),
                            market,
                        },
                    );
                }
            }
        }

        if let Some(fallback) = self.fallback.as_deref() {
            if let Some(profile) = self.attempt(fallback, ticker).await {
                return ValidationResult::from_profile(
                    profile,
                    ValidationSource::Fallback {
                        provider: fallback.id(),
                    },
                );
            }
        }

        debug!("No provider validated {}", ticker);
        ValidationResult::invalid()
    }
}

#[async_trait]
impl TickerValidator for TickerResolver {
    async fn validate(&self, ticker: &str) -> ValidationResult {
        let ticker = normalize_symbol(ticker);
        if ticker.is_empty() {
            return ValidationResult::invalid();
        }
        self.resolve(&ticker).await
    }
}
