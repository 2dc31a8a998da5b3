//! Stock domain models and the category lifecycle rules.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{COMPANY_NAME_MAX_LEN, TICKER_MAX_LEN};
use crate::errors::{Error, Result, ValidationError};

/// Maturity pipeline of a tracked stock. Any category may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockCategory {
    Far,
    Near,
    AlmostReady,
    Ready,
}

impl StockCategory {
    pub const ALL: [StockCategory; 4] = [
        StockCategory::Far,
        StockCategory::Near,
        StockCategory::AlmostReady,
        StockCategory::Ready,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StockCategory::Far => "far",
            StockCategory::Near => "near",
            StockCategory::AlmostReady => "almost_ready",
            StockCategory::Ready => "ready",
        }
    }
}

impl fmt::Display for StockCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        StockCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered)
            .ok_or_else(|| Error::invalid_input(format!("Unknown stock category '{}'", s)))
    }
}

/// Refinement of the `ready` category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockSubcategory {
    Pullback1,
    Pullback2,
}

impl StockSubcategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockSubcategory::Pullback1 => "pullback1",
            StockSubcategory::Pullback2 => "pullback2",
        }
    }
}

impl fmt::Display for StockSubcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockSubcategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pullback1" => Ok(StockSubcategory::Pullback1),
            "pullback2" => Ok(StockSubcategory::Pullback2),
            _ => Err(Error::invalid_input(format!(
                "Unknown stock subcategory '{}'",
                s
            ))),
        }
    }
}

/// One realized category change. Never modified once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    pub from: StockCategory,
    pub to: StockCategory,
    pub changed_at: DateTime<Utc>,
    pub changed_by: String,
}

/// Domain model representing a tracked stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub ticker: String,
    pub company_name: String,
    pub category: StockCategory,
    /// Only ever set while `category` is `Ready`.
    pub subcategory: Option<StockSubcategory>,
    pub current_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    /// Append-only, oldest first.
    pub state_history: Vec<StateChange>,
}

impl Stock {
    pub fn latest_state_change(&self) -> Option<&StateChange> {
        self.state_history.last()
    }
}

/// Input model for registering a stock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStock {
    pub ticker: String,
    pub company_name: String,
    pub category: StockCategory,
    #[serde(default)]
    pub subcategory: Option<StockSubcategory>,
    #[serde(default)]
    pub current_price: Option<Decimal>,
}

impl NewStock {
    /// Validates the input and builds the stock it describes.
    pub fn into_stock(self, created_by: &str, now: DateTime<Utc>) -> Result<Stock> {
        let ticker = normalize_ticker(&self.ticker)?;
        let company_name = validate_company_name(&self.company_name)?;
        validate_price(self.current_price)?;
        validate_subcategory(self.category, self.subcategory)?;

        Ok(Stock {
            ticker,
            company_name,
            category: self.category,
            subcategory: self.subcategory,
            current_price: self.current_price,
            created_at: now,
            updated_at: now,
            created_by: created_by.to_string(),
            state_history: Vec::new(),
        })
    }
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockUpdate {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub category: Option<StockCategory>,
    #[serde(default)]
    pub subcategory: Option<StockSubcategory>,
    #[serde(default)]
    pub current_price: Option<Decimal>,
}

/// Stocks partitioned by their current category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockListing {
    pub far: Vec<Stock>,
    pub near: Vec<Stock>,
    pub almost_ready: Vec<Stock>,
    pub ready: Vec<Stock>,
    pub total: usize,
}

impl StockListing {
    pub fn from_stocks(mut stocks: Vec<Stock>) -> Self {
        stocks.sort_by(|a, b| a.ticker.cmp(&b.ticker));

        let mut listing = StockListing {
            total: stocks.len(),
            ..Default::default()
        };
        for stock in stocks {
            match stock.category {
                StockCategory::Far => listing.far.push(stock),
                StockCategory::Near => listing.near.push(stock),
                StockCategory::AlmostReady => listing.almost_ready.push(stock),
                StockCategory::Ready => listing.ready.push(stock),
            }
        }
        listing
    }
}

/// Trims and uppercases a ticker, enforcing its length bounds.
pub fn normalize_ticker(raw: &str) -> Result<String> {
    let ticker = raw.trim().to_uppercase();
    let len = ticker.chars().count();
    if len == 0 || len > TICKER_MAX_LEN {
        return Err(Error::Validation(ValidationError::Length {
            field: "ticker",
            min: 1,
            max: TICKER_MAX_LEN,
        }));
    }
    Ok(ticker)
}

fn validate_company_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    let len = name.chars().count();
    if len == 0 || len > COMPANY_NAME_MAX_LEN {
        return Err(Error::Validation(ValidationError::Length {
            field: "company_name",
            min: 1,
            max: COMPANY_NAME_MAX_LEN,
        }));
    }
    Ok(name.to_string())
}

fn validate_price(price: Option<Decimal>) -> Result<()> {
    match price {
        Some(p) if p < Decimal::ZERO => Err(Error::invalid_input(
            "current_price must not be negative",
        )),
        _ => Ok(()),
    }
}

fn validate_subcategory(
    category: StockCategory,
    subcategory: Option<StockSubcategory>,
) -> Result<()> {
    if subcategory.is_some() && category != StockCategory::Ready {
        return Err(Error::invalid_input(format!(
            "Subcategory can only be set when category is 'ready' (got '{}')",
            category
        )));
    }
    Ok(())
}

/// Applies a partial update to `stock`.
///
/// All validation happens before any field is touched. A category change
/// that differs from the current value appends exactly one [`StateChange`];
/// leaving `ready` without naming a subcategory clears it.
pub fn apply_update(
    mut stock: Stock,
    update: StockUpdate,
    actor_id: &str,
    now: DateTime<Utc>,
) -> Result<Stock> {
    let company_name = update
        .company_name
        .as_deref()
        .map(validate_company_name)
        .transpose()?;
    validate_price(update.current_price)?;
    let resulting_category = update.category.unwrap_or(stock.category);
    validate_subcategory(resulting_category, update.subcategory)?;

    if let Some(name) = company_name {
        stock.company_name = name;
    }
    if let Some(price) = update.current_price {
        stock.current_price = Some(price);
    }
    if resulting_category != stock.category {
        stock.state_history.push(StateChange {
            from: stock.category,
            to: resulting_category,
            changed_at: now,
            changed_by: actor_id.to_string(),
        });
        stock.category = resulting_category;
    }
    match update.subcategory {
        Some(subcategory) => stock.subcategory = Some(subcategory),
        None if stock.category != StockCategory::Ready => stock.subcategory = None,
        None => {}
    }
    stock.updated_at = now;

    Ok(stock)
}
