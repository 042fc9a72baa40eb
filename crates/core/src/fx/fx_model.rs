use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::prices::DataSource;

/// One daily USD/PEN reference rate. `usd_pen` is how many PEN one USD
/// buys on that date. One row per date; writes upsert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FxRate {
    pub rate_date: NaiveDate,
    pub usd_pen: Decimal,
    pub source: DataSource,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFxRate {
    pub rate_date: NaiveDate,
    pub usd_pen: Decimal,
    pub source: DataSource,
}
