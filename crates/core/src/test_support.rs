//! In-memory trait implementations shared by the service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use stockwatch_market_data::{TickerValidator, ValidationResult};

use crate::access::{Identity, Role};
use crate::errors::{DatabaseError, Error, Result};
use crate::identities::{IdentityRecord, IdentityRepositoryTrait};
use crate::stocks::{Stock, StockMutation, StockRepositoryTrait};

pub fn admin() -> Identity {
    Identity::new("admin-1", "alice", Role::Admin)
}

pub fn user(id: &str) -> Identity {
    Identity::new(id, format!("user-{}", id), Role::User)
}

// --- Stocks ---

#[derive(Clone, Default)]
pub struct MockStockRepository {
    pub stocks: Arc<Mutex<HashMap<String, Stock>>>,
}

impl MockStockRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StockRepositoryTrait for MockStockRepository {
    fn get_stock(&self, ticker: &str) -> Result<Option<Stock>> {
        Ok(self.stocks.lock().unwrap().get(ticker).cloned())
    }

    fn list_stocks(&self) -> Result<Vec<Stock>> {
        Ok(self.stocks.lock().unwrap().values().cloned().collect())
    }

    async fn insert_stock(&self, stock: Stock) -> Result<Stock> {
        let mut stocks = self.stocks.lock().unwrap();
        if stocks.contains_key(&stock.ticker) {
            return Err(Error::Database(DatabaseError::UniqueViolation(
                stock.ticker.clone(),
            )));
        }
        stocks.insert(stock.ticker.clone(), stock.clone());
        Ok(stock)
    }

    async fn modify_stock(&self, ticker: &str, mutation: StockMutation) -> Result<Option<Stock>> {
        let mut stocks = self.stocks.lock().unwrap();
        let Some(current) = stocks.get(ticker).cloned() else {
            return Ok(None);
        };
        let updated = mutation(current)?;
        stocks.insert(ticker.to_string(), updated.clone());
        Ok(Some(updated))
    }

    async fn delete_stock(&self, ticker: &str) -> Result<usize> {
        Ok(usize::from(self.stocks.lock().unwrap().remove(ticker).is_some()))
    }
}

// --- Identities ---

#[derive(Clone, Default)]
pub struct MockIdentityRepository {
    pub records: Arc<Mutex<Vec<IdentityRecord>>>,
}

impl MockIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, identity: &Identity, search_limit: u32) {
        self.records.lock().unwrap().push(IdentityRecord::provisioned(
            identity,
            search_limit,
            Utc::now(),
        ));
    }

    pub fn record(&self, id: &str) -> IdentityRecord {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .unwrap()
    }
}

#[async_trait]
impl IdentityRepositoryTrait for MockIdentityRepository {
    fn get_identity(&self, identity_id: &str) -> Result<Option<IdentityRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == identity_id)
            .cloned())
    }

    fn list_identity_ids(&self) -> Result<Vec<String>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.id.clone())
            .collect())
    }

    async fn insert_identity(&self, record: IdentityRecord) -> Result<IdentityRecord> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.id == record.id) {
            return Err(Error::Database(DatabaseError::UniqueViolation(record.id)));
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn record_limit_reset(
        &self,
        identity_ids: Vec<String>,
        search_limit: Option<u32>,
        at: DateTime<Utc>,
    ) -> Result<usize> {
        let mut records = self.records.lock().unwrap();
        let mut touched = 0;
        for record in records.iter_mut().filter(|r| identity_ids.contains(&r.id)) {
            if let Some(limit) = search_limit {
                record.search_limit = limit;
            }
            record.last_reset_at = Some(at);
            touched += 1;
        }
        Ok(touched)
    }
}

// --- Ticker validation ---

#[derive(Clone, Default)]
pub struct MockValidator {
    pub answers: Arc<Mutex<HashMap<String, ValidationResult>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&self, ticker: &str, result: ValidationResult) {
        self.answers
            .lock()
            .unwrap()
            .insert(ticker.to_string(), result);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TickerValidator for MockValidator {
    async fn validate(&self, ticker: &str) -> ValidationResult {
        self.calls.lock().unwrap().push(ticker.to_string());
        self.answers
            .lock()
            .unwrap()
            .get(ticker)
            .cloned()
            .unwrap_or_else(ValidationResult::invalid)
    }
}
