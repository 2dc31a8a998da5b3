//! Database models for stocks.

use std::str::FromStr;

use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use stockwatch_core::errors::{Error, ValidationError};
use stockwatch_core::stocks::{StateChange, Stock, StockCategory, StockSubcategory};

/// Database model for stocks.
///
/// Prices are stored as decimal text and the state history as a JSON array.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::stocks)]
#[diesel(primary_key(ticker))]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StockDB {
    pub ticker: String,
    pub company_name: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub current_price: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub created_by: String,
    pub state_history: String,
}

impl TryFrom<StockDB> for Stock {
    type Error = Error;

    fn try_from(db: StockDB) -> Result<Self, Self::Error> {
        let state_history: Vec<StateChange> =
            serde_json::from_str(&db.state_history).map_err(ValidationError::from)?;
        Ok(Self {
            category: StockCategory::from_str(&db.category)?,
            subcategory: db
                .subcategory
                .as_deref()
                .map(StockSubcategory::from_str)
                .transpose()?,
            current_price: db
                .current_price
                .as_deref()
                .map(Decimal::from_str)
                .transpose()?,
            created_at: Utc.from_utc_datetime(&db.created_at),
            updated_at: Utc.from_utc_datetime(&db.updated_at),
            ticker: db.ticker,
            company_name: db.company_name,
            created_by: db.created_by,
            state_history,
        })
    }
}

impl TryFrom<&Stock> for StockDB {
    type Error = Error;

    fn try_from(stock: &Stock) -> Result<Self, Self::Error> {
        Ok(Self {
            ticker: stock.ticker.clone(),
            company_name: stock.company_name.clone(),
            category: stock.category.as_str().to_string(),
            subcategory: stock.subcategory.map(|s| s.as_str().to_string()),
            current_price: stock.current_price.map(|p| p.to_string()),
            created_at: stock.created_at.naive_utc(),
            updated_at: stock.updated_at.naive_utc(),
            created_by: stock.created_by.clone(),
            state_history: serde_json::to_string(&stock.state_history)
                .map_err(ValidationError::from)?,
        })
    }
}
