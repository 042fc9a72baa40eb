use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use cartera_core::constants::{BENCHMARK_SP500_SYMBOL, BENCHMARK_SP_BVL_SYMBOL};
use cartera_core::errors::ValidationError;
use cartera_core::portfolio::performance::{
    BenchmarkedPeriod, PerformanceReport, PeriodInterval, ReportScope,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportQuery {
    #[serde(default)]
    interval: PeriodInterval,
    currency: Option<String>,
    ticker_id: Option<String>,
    platform_id: Option<String>,
    exchange_id: Option<String>,
    instrument_type: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl ReportQuery {
    /// At most one scope filter may be given; none means the whole
    /// portfolio.
    fn scope(&self) -> Result<ReportScope, ValidationError> {
        let mut scopes = Vec::new();
        if let Some(id) = &self.ticker_id {
            scopes.push(ReportScope::Ticker(id.clone()));
        }
        if let Some(id) = &self.platform_id {
            scopes.push(ReportScope::Platform(id.clone()));
        }
        if let Some(id) = &self.exchange_id {
            scopes.push(ReportScope::Exchange(id.clone()));
        }
        if let Some(t) = &self.instrument_type {
            scopes.push(ReportScope::InstrumentType(t.to_uppercase()));
        }
        match scopes.len() {
            0 => Ok(ReportScope::Portfolio),
            1 => Ok(scopes.remove(0)),
            _ => Err(ValidationError::InvalidInput(
                "At most one of tickerId, platformId, exchangeId, instrumentType may be given"
                    .to_string(),
            )),
        }
    }

    fn currency(&self) -> String {
        self.currency.clone().unwrap_or_else(|| "USD".to_string())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BenchmarkQuery {
    #[serde(flatten)]
    report: ReportQuery,
    index: String,
}

fn benchmark_symbol(index: &str) -> Result<&'static str, ValidationError> {
    match index.to_lowercase().as_str() {
        "sp500" => Ok(BENCHMARK_SP500_SYMBOL),
        "spbvl" => Ok(BENCHMARK_SP_BVL_SYMBOL),
        other => Err(ValidationError::InvalidInput(format!(
            "Unknown benchmark index '{}', expected sp500 or spbvl",
            other
        ))),
    }
}

async fn performance_report(
    Query(query): Query<ReportQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PerformanceReport>> {
    let scope = query.scope().map_err(cartera_core::Error::from)?;
    let report = state.performance_service.performance_report(
        &scope,
        query.interval,
        &query.currency(),
        query.from,
        query.to,
    )?;
    Ok(Json(report))
}

async fn benchmark_report(
    Query(query): Query<BenchmarkQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BenchmarkedPeriod>>> {
    let scope = query.report.scope().map_err(cartera_core::Error::from)?;
    let symbol = benchmark_symbol(&query.index).map_err(cartera_core::Error::from)?;
    let periods = state.performance_service.benchmark_report(
        &scope,
        query.report.interval,
        &query.report.currency(),
        symbol,
        query.report.from,
        query.report.to,
    )?;
    Ok(Json(periods))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/performance", get(performance_report))
        .route("/performance/benchmark", get(benchmark_report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(
        ticker: Option<&str>,
        platform: Option<&str>,
    ) -> ReportQuery {
        ReportQuery {
            interval: PeriodInterval::Monthly,
            currency: None,
            ticker_id: ticker.map(str::to_string),
            platform_id: platform.map(str::to_string),
            exchange_id: None,
            instrument_type: None,
            from: None,
            to: None,
        }
    }

    #[test]
    fn no_filter_is_portfolio_scope() {
        assert_eq!(query(None, None).scope().unwrap(), ReportScope::Portfolio);
    }

    #[test]
    fn single_filter_selects_scope() {
        assert_eq!(
            query(Some("t1"), None).scope().unwrap(),
            ReportScope::Ticker("t1".to_string())
        );
    }

    #[test]
    fn conflicting_filters_are_rejected() {
        assert!(query(Some("t1"), Some("p1")).scope().is_err());
    }

    #[test]
    fn benchmark_symbols_resolve() {
        assert_eq!(benchmark_symbol("sp500").unwrap(), "^GSPC");
        assert_eq!(benchmark_symbol("SPBVL").unwrap(), "^SPBLPGPT");
        assert!(benchmark_symbol("nasdaq").is_err());
    }
}
