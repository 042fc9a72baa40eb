//! Ticker domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain model representing a tracked instrument.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    pub id: String,
    pub symbol: String,
    pub name: String,
    /// USD or PEN. Every price and dividend for the ticker is quoted
    /// in this currency.
    pub currency: String,
    pub instrument_type: String,
    pub exchange_id: Option<String>,
    pub country: Option<String>,
    pub sector: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicker {
    pub id: Option<String>,
    pub symbol: String,
    pub name: String,
    pub currency: String,
    pub instrument_type: String,
    pub exchange_id: Option<String>,
    pub country: Option<String>,
    pub sector: Option<String>,
}

/// Input model for editing a ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerUpdate {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub currency: String,
    pub instrument_type: String,
    pub exchange_id: Option<String>,
    pub country: Option<String>,
    pub sector: Option<String>,
    pub is_active: bool,
}
