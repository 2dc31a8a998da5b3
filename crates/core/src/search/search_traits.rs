use async_trait::async_trait;

use super::search_model::{StockSearchResult, TickerValidationResponse};
use crate::access::Identity;
use crate::errors::Result;

#[async_trait]
pub trait SearchServiceTrait: Send + Sync {
    /// Registry lookup plus external validation, charged against the
    /// caller's quota only when the ticker validates externally.
    ///
    /// Fails with `QuotaExceeded` when a charge is due and none remain.
    async fn search(&self, identity: &Identity, ticker: &str) -> Result<StockSearchResult>;

    /// External validation only, free of charge.
    async fn validate_ticker(
        &self,
        identity: &Identity,
        ticker: &str,
    ) -> Result<TickerValidationResponse>;
}
