//! Ticker lookup provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::TickerProfile;

/// Trait for external ticker lookup sources.
///
/// Implementations perform one network lookup (or in-process lookup, for the
/// static catalog) per call and normalize the response into a
/// [`TickerProfile`]. A profile without a display name must be reported as
/// [`MarketDataError::SymbolNotFound`].
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use stockwatch_market_data::provider::TickerLookupProvider;
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl TickerLookupProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn lookup(&self, symbol: &str) -> Result<TickerProfile, MarketDataError> {
///         Err(MarketDataError::SymbolNotFound(symbol.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait TickerLookupProvider: Send + Sync {
    /// Unique identifier for this provider, used as the source tag.
    fn id(&self) -> &'static str;

    /// Look a single, already-normalized symbol up.
    async fn lookup(&self, symbol: &str) -> Result<TickerProfile, MarketDataError>;
}
