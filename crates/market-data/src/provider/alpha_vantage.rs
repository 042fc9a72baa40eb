//! Alpha Vantage market data provider.
//!
//! Equities via the TIME_SERIES_DAILY endpoint. The free tier is
//! limited to 5 calls per minute; throttling responses arrive as a
//! "Note"/"Information" body with HTTP 200.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

use crate::errors::MarketDataError;
use crate::models::{PriceRequest, ProviderPrice};
use crate::provider::traits::PriceProvider;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_ID: &str = "ALPHA_VANTAGE";

pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyQuote>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyQuote {
    #[serde(rename = "4. close")]
    close: String,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String) -> Self {
        AlphaVantageProvider {
            client: Client::new(),
            api_key,
        }
    }

    fn collect_range(
        series: HashMap<String, DailyQuote>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<ProviderPrice> {
        let mut prices: Vec<ProviderPrice> = series
            .into_iter()
            .filter_map(|(date_str, quote)| {
                let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").ok()?;
                if date < start || date > end {
                    return None;
                }
                let close = Decimal::from_str(&quote.close).ok()?;
                Some(ProviderPrice { date, close })
            })
            .collect();
        prices.sort_by_key(|p| p.date);
        prices
    }
}

#[async_trait]
impl PriceProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        2
    }

    fn supports(&self, request: &PriceRequest) -> bool {
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

        debug!("Alpha Vantage request: {}", request.symbol);
        let body: TimeSeriesResponse = self
            .client
            .get(BASE_URL)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", request.symbol.as_str()),
                ("outputsize", "full"),
                ("apikey", self.api_key.as_str()),
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

        if let Some(message) = body.error_message {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message,
            });
        }
        // Throttling responses come back 200 with a prose body.
        if body.note.is_some() || body.information.is_some() {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let series = body
            .time_series
            .ok_or_else(|| MarketDataError::NoData(request.symbol.clone()))?;
        Ok(Self::collect_range(series, request.start, request.end))
    }
}
