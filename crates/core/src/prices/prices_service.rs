use std::sync::Arc;

use super::prices_model::{HistoricalPrice, NewPrice, PriceSeries};
use super::prices_traits::{PriceRepositoryTrait, PriceServiceTrait};
use crate::errors::ValidationError;
use crate::tickers::TickerRepositoryTrait;
use crate::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Service for stored historical prices (manual entry and lookups).
pub struct PriceService {
    price_repository: Arc<dyn PriceRepositoryTrait>,
    ticker_repository: Arc<dyn TickerRepositoryTrait>,
}

impl PriceService {
    pub fn new(
        price_repository: Arc<dyn PriceRepositoryTrait>,
        ticker_repository: Arc<dyn TickerRepositoryTrait>,
    ) -> Self {
        Self {
            price_repository,
            ticker_repository,
        }
    }
}

#[async_trait]
impl PriceServiceTrait for PriceService {
    fn get_prices_for_ticker(&self, ticker_id: &str) -> Result<Vec<HistoricalPrice>> {
        self.price_repository.get_prices_for_ticker(ticker_id)
    }

    fn get_price_on_or_before(
        &self,
        ticker_id: &str,
        date: NaiveDate,
    ) -> Result<Option<HistoricalPrice>> {
        self.price_repository.get_price_on_or_before(ticker_id, date)
    }

    fn load_price_series(&self, ticker_id: &str) -> Result<PriceSeries> {
        let rows = self.price_repository.get_prices_for_ticker(ticker_id)?;
        Ok(PriceSeries::from_pairs(
            rows.into_iter().map(|row| (row.price_date, row.price)),
        ))
    }

    async fn upsert_price(&self, price: NewPrice) -> Result<HistoricalPrice> {
        self.ticker_repository.get_ticker(&price.ticker_id)?;
        if price.price <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "price must be positive".to_string(),
            )
            .into());
        }
        self.price_repository.upsert_price(price).await
    }

    async fn delete_price(&self, ticker_id: &str, date: NaiveDate) -> Result<()> {
        self.price_repository.delete_price(ticker_id, date).await
    }
}
