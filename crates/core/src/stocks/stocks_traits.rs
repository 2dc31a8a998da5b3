//! Stock repository and service traits.

use async_trait::async_trait;

use super::stocks_model::{NewStock, Stock, StockListing, StockUpdate};
use crate::access::AdminCapability;
use crate::errors::Result;

/// Read-modify-write step run by [`StockRepositoryTrait::modify_stock`].
pub type StockMutation = Box<dyn FnOnce(Stock) -> Result<Stock> + Send + 'static>;

/// Trait for stock persistence.
#[async_trait]
pub trait StockRepositoryTrait: Send + Sync {
    fn get_stock(&self, ticker: &str) -> Result<Option<Stock>>;

    fn list_stocks(&self) -> Result<Vec<Stock>>;

    /// Fails with `DatabaseError::UniqueViolation` if the ticker exists.
    async fn insert_stock(&self, stock: Stock) -> Result<Stock>;

    /// Loads the stock, applies `mutation` and stores the result as one
    /// transaction. Returns `None` if the ticker does not exist. When the
    /// mutation fails nothing is written.
    async fn modify_stock(&self, ticker: &str, mutation: StockMutation) -> Result<Option<Stock>>;

    /// Returns the number of deleted rows.
    async fn delete_stock(&self, ticker: &str) -> Result<usize>;
}

/// Administrative stock registry operations.
#[async_trait]
pub trait StockServiceTrait: Send + Sync {
    async fn create_stock(&self, cap: &AdminCapability, new_stock: NewStock) -> Result<Stock>;

    fn get_stock(&self, cap: &AdminCapability, ticker: &str) -> Result<Option<Stock>>;

    fn list_stocks(&self, cap: &AdminCapability) -> Result<StockListing>;

    async fn update_stock(
        &self,
        cap: &AdminCapability,
        ticker: &str,
        update: StockUpdate,
    ) -> Result<Option<Stock>>;

    /// Hard delete. Returns whether the stock existed.
    async fn delete_stock(&self, cap: &AdminCapability, ticker: &str) -> Result<bool>;
}
