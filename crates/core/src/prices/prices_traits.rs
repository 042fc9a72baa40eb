use super::prices_model::{HistoricalPrice, NewPrice, PriceSeries};
use crate::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for historical price repository operations.
#[async_trait]
pub trait PriceRepositoryTrait: Send + Sync {
    fn get_prices_for_ticker(&self, ticker_id: &str) -> Result<Vec<HistoricalPrice>>;
    fn get_price_on_or_before(
        &self,
        ticker_id: &str,
        date: NaiveDate,
    ) -> Result<Option<HistoricalPrice>>;
    /// The latest stored price date for a ticker, used to pick the
    /// start of an incremental provider refresh.
    fn get_last_price_date(&self, ticker_id: &str) -> Result<Option<NaiveDate>>;
    async fn upsert_price(&self, price: NewPrice) -> Result<HistoricalPrice>;
    async fn upsert_prices(&self, prices: Vec<NewPrice>) -> Result<usize>;
    async fn delete_price(&self, ticker_id: &str, date: NaiveDate) -> Result<()>;
}

/// Trait for price service operations.
#[async_trait]
pub trait PriceServiceTrait: Send + Sync {
    fn get_prices_for_ticker(&self, ticker_id: &str) -> Result<Vec<HistoricalPrice>>;
    fn get_price_on_or_before(
        &self,
        ticker_id: &str,
        date: NaiveDate,
    ) -> Result<Option<HistoricalPrice>>;
    /// Loads the full stored series for a ticker into the lookup
    /// structure the aggregator uses.
    fn load_price_series(&self, ticker_id: &str) -> Result<PriceSeries>;
    async fn upsert_price(&self, price: NewPrice) -> Result<HistoricalPrice>;
    async fn delete_price(&self, ticker_id: &str, date: NaiveDate) -> Result<()>;
}
