use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A cash dividend paid by a ticker. Credited to the period's return,
/// never to invested capital.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dividend {
    pub id: String,
    pub ticker_id: String,
    pub pay_date: NaiveDate,
    pub amount: Decimal,
    pub currency: String,
    pub market: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDividend {
    pub id: Option<String>,
    pub ticker_id: String,
    pub pay_date: NaiveDate,
    pub amount: Decimal,
    pub currency: String,
    pub market: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendUpdate {
    pub id: String,
    pub ticker_id: String,
    pub pay_date: NaiveDate,
    pub amount: Decimal,
    pub currency: String,
    pub market: Option<String>,
}
