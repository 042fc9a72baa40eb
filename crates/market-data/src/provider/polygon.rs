//! Polygon.io market data provider.
//!
//! Daily bars via the aggregates endpoint. Requires an API key; the
//! free tier allows 5 calls per minute, which the sequential refresh
//! loop plus inter-call delay stays under.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{PriceRequest, ProviderPrice};
use crate::provider::traits::PriceProvider;

const BASE_URL: &str = "https://api.polygon.io";
const PROVIDER_ID: &str = "POLYGON";

pub struct PolygonProvider {
    client: Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct AggsResponse {
    results: Option<Vec<AggBar>>,
    status: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AggBar {
    /// Bar start, Unix milliseconds.
    t: i64,
    /// Closing price.
    c: Decimal,
}

impl PolygonProvider {
    pub fn new(api_key: String) -> Self {
        PolygonProvider {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl PriceProvider for PolygonProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        1
    }

    fn supports(&self, request: &PriceRequest) -> bool {
        // Polygon only carries US-listed instruments.
        !matches!(request.country.as_deref(), Some("PE"))
    }

    async fn historical_prices(
        &self,
        request: &PriceRequest,
    ) -> Result<Vec<ProviderPrice>, MarketDataError> {
        if self.api_key.is_empty() {
            return Err(MarketDataError::NotConfigured {
                provider: PROVIDER_ID.to_string(),
                message: "missing API key".to_string(),
            });
        }

        let url = format!(
            "{}/v2/aggs/ticker/{}/range/1/day/{}/{}",
            BASE_URL, request.symbol, request.start, request.end
        );
        debug!("Polygon request: {} [{} - {}]", request.symbol, request.start, request.end);

        let response = self
            .client
            .get(&url)
            .query(&[("adjusted", "true"), ("sort", "asc"), ("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| MarketDataError::from_request(PROVIDER_ID, e))?;

        if response.status().as_u16() == 429 {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let body: AggsResponse = response
            .json()
            .await
            .map_err(|e| MarketDataError::ParseError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        if let Some(error) = body.error {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: error,
            });
        }
        if body.status.as_deref() == Some("ERROR") {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "aggregates query failed".to_string(),
            });
        }

        let mut prices: Vec<ProviderPrice> = body
            .results
            .unwrap_or_default()
            .into_iter()
            .filter_map(|bar| {
                DateTime::from_timestamp_millis(bar.t).map(|ts| ProviderPrice {
                    date: ts.date_naive(),
                    close: bar.c,
                })
            })
            .collect();
        prices.sort_by_key(|p| p.date);
        Ok(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_aggregates_payload() {
        let json = r#"{
            "status": "OK",
            "results": [
                {"t": 1704153600000, "c": 104.25, "o": 103.0, "h": 105.0, "l": 102.5, "v": 1200},
                {"t": 1704240000000, "c": 106.5, "o": 104.3, "h": 107.0, "l": 104.0, "v": 900}
            ]
        }"#;
        let parsed: AggsResponse = serde_json::from_str(json).unwrap();
        let bars = parsed.results.unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].c, dec!(104.25));
        let date = DateTime::from_timestamp_millis(bars[0].t).unwrap().date_naive();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn skips_peruvian_listings() {
        let provider = PolygonProvider::new("key".to_string());
        let request = PriceRequest {
            symbol: "CPACASC1".to_string(),
            country: Some("PE".to_string()),
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        };
        assert!(!provider.supports(&request));
    }
}
