//! Yahoo Finance market data provider.
//!
//! Daily bars via the public v8 chart endpoint. No API key, so this is
//! the fallback for symbols the paid providers miss, and the only
//! remote source for the benchmark indices (^GSPC, ^SPBLPGPT).

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use log::debug;
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{PriceRequest, ProviderPrice};
use crate::provider::traits::PriceProvider;

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const PROVIDER_ID: &str = "YAHOO";

pub struct YahooProvider {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    close: Vec<Option<f64>>,
}

impl YahooProvider {
    pub fn new() -> Self {
        YahooProvider {
            client: Client::new(),
        }
    }

    fn prices_from_result(result: ChartResult) -> Vec<ProviderPrice> {
        let timestamps = result.timestamp.unwrap_or_default();
        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default();

        timestamps
            .into_iter()
            .zip(closes)
            .filter_map(|(ts, close)| {
                let close = Decimal::from_f64(close?)?;
                let date = DateTime::from_timestamp(ts, 0)?.date_naive();
                Some(ProviderPrice { date, close })
            })
            .collect()
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        3
    }

    async fn historical_prices(
        &self,
        request: &PriceRequest,
    ) -> Result<Vec<ProviderPrice>, MarketDataError> {
        let period1 = request
            .start
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or(0);
        let period2 = request
            .end
            .and_hms_opt(23, 59, 59)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or(0);

        let url = format!("{}/{}", BASE_URL, request.symbol);
        debug!("Yahoo request: {} [{} - {}]", request.symbol, request.start, request.end);

        let body: ChartResponse = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await
            .map_err(|e| MarketDataError::from_request(PROVIDER_ID, e))?
            .json()
            .await
            .map_err(|e| MarketDataError::ParseError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        if let Some(error) = body.chart.error {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: error.description,
            });
        }

        let result = body
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| MarketDataError::NoData(request.symbol.clone()))?;

        let mut prices = Self::prices_from_result(result);
        prices.sort_by_key(|p| p.date);
        Ok(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_chart_payload_and_skips_null_closes() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704153600, 1704240000, 1704326400],
                    "indicators": {
                        "quote": [{"close": [470.5, null, 472.25]}]
                    }
                }],
                "error": null
            }
        }"#;
        let parsed: ChartResponse = serde_json::from_str(json).unwrap();
        let result = parsed.chart.result.unwrap().remove(0);
        let prices = YahooProvider::prices_from_result(result);
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].close, dec!(470.5));
        assert_eq!(prices[1].close, dec!(472.25));
        assert_eq!(prices[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }
}
