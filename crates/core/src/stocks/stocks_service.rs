use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};

use super::stocks_model::{apply_update, NewStock, Stock, StockListing, StockUpdate};
use super::stocks_traits::{StockRepositoryTrait, StockServiceTrait};
use crate::access::AdminCapability;
use crate::errors::{DatabaseError, Error, Result};

/// Service for managing the stock registry
pub struct StockService {
    repository: Arc<dyn StockRepositoryTrait>,
}

impl StockService {
    pub fn new(repository: Arc<dyn StockRepositoryTrait>) -> Self {
        Self { repository }
    }
}

fn lookup_key(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

#[async_trait]
impl StockServiceTrait for StockService {
    async fn create_stock(&self, cap: &AdminCapability, new_stock: NewStock) -> Result<Stock> {
        let stock = new_stock.into_stock(cap.actor_id(), Utc::now())?;

        if self.repository.get_stock(&stock.ticker)?.is_some() {
            return Err(Error::DuplicateKey {
                entity: "Stock",
                key: stock.ticker,
            });
        }

        let ticker = stock.ticker.clone();
        let created = self.repository.insert_stock(stock).await.map_err(|e| match e {
            Error::Database(DatabaseError::UniqueViolation(_)) => Error::DuplicateKey {
                entity: "Stock",
                key: ticker,
            },
            other => other,
        })?;

        info!(
            "{} registered {} in category {}",
            cap.actor_id(),
            created.ticker,
            created.category
        );
        Ok(created)
    }

    fn get_stock(&self, _cap: &AdminCapability, ticker: &str) -> Result<Option<Stock>> {
        self.repository.get_stock(&lookup_key(ticker))
    }

    fn list_stocks(&self, _cap: &AdminCapability) -> Result<StockListing> {
        Ok(StockListing::from_stocks(self.repository.list_stocks()?))
    }

    async fn update_stock(
        &self,
        cap: &AdminCapability,
        ticker: &str,
        update: StockUpdate,
    ) -> Result<Option<Stock>> {
        let actor = cap.actor_id().to_string();
        let updated = self
            .repository
            .modify_stock(
                &lookup_key(ticker),
                Box::new(move |stock| apply_update(stock, update, &actor, Utc::now())),
            )
            .await?;

        if let Some(stock) = &updated {
            debug!(
                "{} updated {} ({} state changes recorded)",
                cap.actor_id(),
                stock.ticker,
                stock.state_history.len()
            );
        }
        Ok(updated)
    }

    async fn delete_stock(&self, cap: &AdminCapability, ticker: &str) -> Result<bool> {
        let deleted = self.repository.delete_stock(&lookup_key(ticker)).await? > 0;
        if deleted {
            info!("{} deleted {}", cap.actor_id(), lookup_key(ticker));
        }
        Ok(deleted)
    }
}
