//! Bolsa de Valores de Lima (BVL) market data provider.
//!
//! Lima-listed instruments via the BVL data-on-demand API. Only covers
//! country "PE"; everything else is skipped by the chain.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;
use crate::models::{PriceRequest, ProviderPrice};
use crate::provider::traits::PriceProvider;

const BASE_URL: &str = "https://dataondemand.bvl.com.pe/v1/stock-quote/daily";
const PROVIDER_ID: &str = "BVL";

pub struct BvlProvider {
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DailyQuoteRequest<'a> {
    nemonico: &'a str,
    start_date: String,
    end_date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyQuoteResponse {
    content: Option<Vec<DailyQuoteRow>>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyQuoteRow {
    /// Session date, "dd/mm/YYYY".
    session_date: String,
    last_price: Option<Decimal>,
}

impl BvlProvider {
    pub fn new() -> Self {
        BvlProvider {
            client: Client::new(),
        }
    }

    fn collect(rows: Vec<DailyQuoteRow>) -> Vec<ProviderPrice> {
        let mut prices: Vec<ProviderPrice> = rows
            .into_iter()
            .filter_map(|row| {
                let date = NaiveDate::parse_from_str(&row.session_date, "%d/%m/%Y").ok()?;
                Some(ProviderPrice {
                    date,
                    close: row.last_price?,
                })
            })
            .collect();
        prices.sort_by_key(|p| p.date);
        prices
    }
}

impl Default for BvlProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceProvider for BvlProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        4
    }

    fn supports(&self, request: &PriceRequest) -> bool {
        matches!(request.country.as_deref(), Some("PE"))
    }

    async fn historical_prices(
        &self,
        request: &PriceRequest,
    ) -> Result<Vec<ProviderPrice>, MarketDataError> {
        debug!("BVL request: {}", request.symbol);
        let payload = DailyQuoteRequest {
            nemonico: &request.symbol,
            start_date: request.start.format("%d/%m/%Y").to_string(),
            end_date: request.end.format("%d/%m/%Y").to_string(),
        };

        let body: DailyQuoteResponse = self
            .client
            .post(BASE_URL)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MarketDataError::from_request(PROVIDER_ID, e))?
            .json()
            .await
            .map_err(|e| MarketDataError::ParseError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        match body.content {
            Some(rows) if !rows.is_empty() => Ok(Self::collect(rows)),
            _ => Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: body
                    .message
                    .unwrap_or_else(|| format!("no rows for {}", request.symbol)),
            }),
        }
    }
}
