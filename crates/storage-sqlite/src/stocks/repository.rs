use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use stockwatch_core::stocks::{Stock, StockMutation, StockRepositoryTrait};
use stockwatch_core::Result;

use super::model::StockDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::stocks;
use crate::schema::stocks::dsl::*;

pub struct StockRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl StockRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        StockRepository { pool, writer }
    }
}

#[async_trait]
impl StockRepositoryTrait for StockRepository {
    fn get_stock(&self, ticker_key: &str) -> Result<Option<Stock>> {
        let mut conn = get_connection(&self.pool)?;
        stocks
            .find(ticker_key)
            .select(StockDB::as_select())
            .first::<StockDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Stock::try_from)
            .transpose()
    }

    fn list_stocks(&self) -> Result<Vec<Stock>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = stocks
            .order(ticker.asc())
            .select(StockDB::as_select())
            .load::<StockDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(Stock::try_from).collect()
    }

    async fn insert_stock(&self, stock: Stock) -> Result<Stock> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Stock> {
                let row = StockDB::try_from(&stock)?;
                let inserted = diesel::insert_into(stocks::table)
                    .values(&row)
                    .returning(StockDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Stock::try_from(inserted)
            })
            .await
    }

    async fn modify_stock(&self, ticker_key: &str, mutation: StockMutation) -> Result<Option<Stock>> {
        let ticker_key = ticker_key.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Stock>> {
                let Some(current) = stocks
                    .find(&ticker_key)
                    .select(StockDB::as_select())
                    .first::<StockDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                else {
                    return Ok(None);
                };

                // An error here rolls back the surrounding transaction.
                let updated = mutation(Stock::try_from(current)?)?;
                let row = StockDB::try_from(&updated)?;

                diesel::update(stocks.find(&ticker_key))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(Some(updated))
            })
            .await
    }

    async fn delete_stock(&self, ticker_key: &str) -> Result<usize> {
        let ticker_key = ticker_key.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(stocks.find(ticker_key))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
