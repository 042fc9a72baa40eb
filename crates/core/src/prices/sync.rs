//! Provider-backed price refresh.
//!
//! Refresh is sequential per ticker: one provider chain walk, then the
//! rows are upserted. Looping all active tickers pauses between
//! tickers so the free-tier providers are not hammered. Provider
//! failure is never fatal; the summary carries the attempt list.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Local, NaiveDate};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use cartera_market_data::{FetchReport, PriceRequest, ProviderAttempt, ProviderChain};

use super::prices_model::{DataSource, NewPrice};
use super::prices_traits::PriceRepositoryTrait;
use crate::tickers::TickerRepositoryTrait;
use crate::Result;

/// How far back a first refresh reaches when the ticker has no stored
/// prices yet.
pub const DEFAULT_HISTORY_DAYS: i64 = 365 * 5;

/// Pause between tickers in a refresh-all loop.
const INTER_TICKER_DELAY: Duration = Duration::from_millis(800);

/// What one ticker's refresh did, for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerRefreshSummary {
    pub ticker_id: String,
    pub symbol: String,
    pub attempts: Vec<ProviderAttempt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub prices_stored: usize,
}

#[async_trait]
pub trait PriceSyncServiceTrait: Send + Sync {
    async fn refresh_ticker(&self, ticker_id: &str) -> Result<TickerRefreshSummary>;
    async fn refresh_all(&self) -> Result<Vec<TickerRefreshSummary>>;
}

pub struct PriceSyncService {
    chain: ProviderChain,
    ticker_repository: Arc<dyn TickerRepositoryTrait>,
    price_repository: Arc<dyn PriceRepositoryTrait>,
}

impl PriceSyncService {
    pub fn new(
        chain: ProviderChain,
        ticker_repository: Arc<dyn TickerRepositoryTrait>,
        price_repository: Arc<dyn PriceRepositoryTrait>,
    ) -> Self {
        Self {
            chain,
            ticker_repository,
            price_repository,
        }
    }

    fn refresh_start(&self, ticker_id: &str, today: NaiveDate) -> Result<NaiveDate> {
        let start = match self.price_repository.get_last_price_date(ticker_id)? {
            Some(last) => last + ChronoDuration::days(1),
            None => today - ChronoDuration::days(DEFAULT_HISTORY_DAYS),
        };
        Ok(start.min(today))
    }

    async fn store_report(&self, ticker_id: &str, report: &FetchReport) -> Result<usize> {
        if !report.has_data() {
            return Ok(0);
        }
        let source = report
            .source
            .as_deref()
            .map(DataSource::from)
            .unwrap_or(DataSource::Manual);
        let rows: Vec<NewPrice> = report
            .prices
            .iter()
            .map(|price| NewPrice {
                ticker_id: ticker_id.to_string(),
                price_date: price.date,
                price: price.close,
                source,
            })
            .collect();
        self.price_repository.upsert_prices(rows).await
    }
}

#[async_trait]
impl PriceSyncServiceTrait for PriceSyncService {
    async fn refresh_ticker(&self, ticker_id: &str) -> Result<TickerRefreshSummary> {
        let ticker = self.ticker_repository.get_ticker(ticker_id)?;
        let today = Local::now().date_naive();
        let start = self.refresh_start(ticker_id, today)?;

        let request = PriceRequest {
            symbol: ticker.symbol.clone(),
            country: ticker.country.clone(),
            start,
            end: today,
        };
        let report = self.chain.fetch_historical(&request).await;
        let stored = self.store_report(ticker_id, &report).await?;

        if stored == 0 {
            warn!("No prices fetched for {} ({})", ticker.symbol, ticker_id);
        } else {
            info!(
                "Stored {} prices for {} from {}",
                stored,
                ticker.symbol,
                report.source.as_deref().unwrap_or("?")
            );
        }

        Ok(TickerRefreshSummary {
            ticker_id: ticker.id,
            symbol: ticker.symbol,
            attempts: report.attempts,
            source: report.source,
            prices_stored: stored,
        })
    }

    async fn refresh_all(&self) -> Result<Vec<TickerRefreshSummary>> {
        let tickers = self.ticker_repository.get_active_tickers()?;
        let mut summaries = Vec::with_capacity(tickers.len());
        for (index, ticker) in tickers.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(INTER_TICKER_DELAY).await;
            }
            // One failing ticker must not abort the loop.
            match self.refresh_ticker(&ticker.id).await {
                Ok(summary) => summaries.push(summary),
                Err(err) => {
                    warn!("Refresh failed for {}: {}", ticker.symbol, err);
                    summaries.push(TickerRefreshSummary {
                        ticker_id: ticker.id.clone(),
                        symbol: ticker.symbol.clone(),
                        attempts: Vec::new(),
                        source: None,
                        prices_stored: 0,
                    });
                }
            }
        }
        Ok(summaries)
    }
}
