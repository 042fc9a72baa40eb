//! Wire-agnostic models shared by all providers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single daily closing price as returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderPrice {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// A single daily USD/PEN observation as returned by an FX provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderFxRate {
    pub date: NaiveDate,
    pub rate: Decimal,
}

/// What the caller wants fetched. The country lets providers that only
/// cover one market (BVL covers Lima) opt out without a network call.
#[derive(Debug, Clone)]
pub struct PriceRequest {
    pub symbol: String,
    pub country: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Outcome of one provider call, kept for display in the refresh UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAttempt {
    pub provider: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub prices_fetched: usize,
}

/// Result of walking the provider chain for one symbol. Total failure
/// across all providers is a valid, empty report, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchReport {
    pub symbol: String,
    pub attempts: Vec<ProviderAttempt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip)]
    pub prices: Vec<ProviderPrice>,
}

impl FetchReport {
    pub fn empty(symbol: &str) -> Self {
        FetchReport {
            symbol: symbol.to_string(),
            attempts: Vec::new(),
            source: None,
            prices: Vec::new(),
        }
    }

    pub fn has_data(&self) -> bool {
        !self.prices.is_empty()
    }
}
