//! Price domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a stored price or FX rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSource {
    Polygon,
    AlphaVantage,
    Yahoo,
    Bvl,
    Sbs,
    Manual,
    Csv,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Polygon => "POLYGON",
            DataSource::AlphaVantage => "ALPHA_VANTAGE",
            DataSource::Yahoo => "YAHOO",
            DataSource::Bvl => "BVL",
            DataSource::Sbs => "SBS",
            DataSource::Manual => "MANUAL",
            DataSource::Csv => "CSV",
        }
    }
}

impl From<&str> for DataSource {
    fn from(value: &str) -> Self {
        match value {
            "POLYGON" => DataSource::Polygon,
            "ALPHA_VANTAGE" => DataSource::AlphaVantage,
            "YAHOO" => DataSource::Yahoo,
            "BVL" => DataSource::Bvl,
            "SBS" => DataSource::Sbs,
            "CSV" => DataSource::Csv,
            _ => DataSource::Manual,
        }
    }
}

/// One stored closing price. At most one row exists per (ticker, date);
/// writes overwrite in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPrice {
    pub ticker_id: String,
    pub price_date: NaiveDate,
    pub price: Decimal,
    pub source: DataSource,
    pub updated_at: DateTime<Utc>,
}

/// Input model for a price upsert (manual entry, CSV, or provider sync).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPrice {
    pub ticker_id: String,
    pub price_date: NaiveDate,
    pub price: Decimal,
    pub source: DataSource,
}

/// An in-memory date-indexed price series with the lookup rule the
/// aggregator relies on: the price for a date is the stored price on
/// that date or, failing that, the most recent earlier one. No earlier
/// price means the position is worth nothing yet.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    prices: BTreeMap<NaiveDate, Decimal>,
}

impl PriceSeries {
    pub fn new() -> Self {
        PriceSeries {
            prices: BTreeMap::new(),
        }
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (NaiveDate, Decimal)>) -> Self {
        PriceSeries {
            prices: pairs.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, date: NaiveDate, price: Decimal) {
        self.prices.insert(date, price);
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.prices.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.prices.keys().next_back().copied()
    }

    /// Most recent price on or before `date`.
    pub fn on_or_before(&self, date: NaiveDate) -> Option<Decimal> {
        self.prices.range(..=date).next_back().map(|(_, p)| *p)
    }

    /// Whether any stored observation falls inside `[start, end]`.
    pub fn has_observation_between(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.prices.range(start..=end).next().is_some()
    }
}
