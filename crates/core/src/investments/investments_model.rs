//! Investment event domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether the event bought into or sold out of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    Investment,
    Divestment,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Investment => "INVESTMENT",
            OperationType::Divestment => "DIVESTMENT",
        }
    }

    pub fn from_str_db(value: &str) -> Option<Self> {
        match value {
            "INVESTMENT" => Some(OperationType::Investment),
            "DIVESTMENT" => Some(OperationType::Divestment),
            _ => None,
        }
    }
}

/// Where the money came from. Reinvested proceeds move quantity and
/// cost basis but are excluded from contribution totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapitalOrigin {
    #[default]
    FreshCash,
    Reinvestment,
}

impl CapitalOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapitalOrigin::FreshCash => "FRESH_CASH",
            CapitalOrigin::Reinvestment => "REINVESTMENT",
        }
    }

    pub fn from_str_db(value: &str) -> Option<Self> {
        match value {
            "FRESH_CASH" => Some(CapitalOrigin::FreshCash),
            "REINVESTMENT" => Some(CapitalOrigin::Reinvestment),
            _ => None,
        }
    }
}

/// A single purchase or sale against a ticker.
///
/// `amount` and `quantity` are signed by operation: positive for an
/// INVESTMENT, negative for a DIVESTMENT. The amount is quoted in the
/// ticker's currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub ticker_id: String,
    pub event_date: NaiveDate,
    pub amount: Decimal,
    pub quantity: Decimal,
    pub platform_id: Option<String>,
    pub exchange_id: Option<String>,
    pub operation: OperationType,
    pub capital_origin: CapitalOrigin,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for recording an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestment {
    pub id: Option<String>,
    pub ticker_id: String,
    pub event_date: NaiveDate,
    pub amount: Decimal,
    pub quantity: Decimal,
    pub platform_id: Option<String>,
    pub exchange_id: Option<String>,
    pub operation: OperationType,
    #[serde(default)]
    pub capital_origin: CapitalOrigin,
    pub notes: Option<String>,
}

/// Input model for editing an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentUpdate {
    pub id: String,
    pub ticker_id: String,
    pub event_date: NaiveDate,
    pub amount: Decimal,
    pub quantity: Decimal,
    pub platform_id: Option<String>,
    pub exchange_id: Option<String>,
    pub operation: OperationType,
    pub capital_origin: CapitalOrigin,
    pub notes: Option<String>,
}
