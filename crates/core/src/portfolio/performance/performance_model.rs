//! Performance domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::period::PeriodInterval;

/// What slice of the portfolio a report covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportScope {
    Portfolio,
    Ticker(String),
    Platform(String),
    Exchange(String),
    InstrumentType(String),
}

impl ReportScope {
    pub fn describe(&self) -> String {
        match self {
            ReportScope::Portfolio => "portfolio".to_string(),
            ReportScope::Ticker(id) => format!("ticker:{}", id),
            ReportScope::Platform(id) => format!("platform:{}", id),
            ReportScope::Exchange(id) => format!("exchange:{}", id),
            ReportScope::InstrumentType(t) => format!("type:{}", t),
        }
    }
}

/// One calendar period of the report.
///
/// `gain` is the flow-adjusted result for the period: closing minus
/// opening minus new-capital contributions, plus dividends paid in the
/// period. `cumulative_return` chains the per-period rates
/// geometrically; `max_drawdown` is the worst peak-to-trough decline
/// of the cumulative growth series so far, as a negative fraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodPerformance {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub opening_value: Decimal,
    pub contributions: Decimal,
    pub dividends: Decimal,
    pub closing_value: Decimal,
    pub gain: Decimal,
    pub return_rate: Decimal,
    pub cumulative_return: Decimal,
    pub max_drawdown: Decimal,
}

/// A full report for one scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub scope: String,
    pub currency: String,
    pub interval: PeriodInterval,
    pub periods: Vec<PeriodPerformance>,
}

/// A period with the benchmark laid alongside. Both benchmark fields
/// are null for periods the index series does not cover.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkedPeriod {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub cumulative_return: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark_cumulative_return: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<Decimal>,
}
