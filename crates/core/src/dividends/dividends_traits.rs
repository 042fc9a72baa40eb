use super::dividends_model::{Dividend, DividendUpdate, NewDividend};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DividendRepositoryTrait: Send + Sync {
    fn get_dividend(&self, dividend_id: &str) -> Result<Dividend>;
    fn get_dividends(&self) -> Result<Vec<Dividend>>;
    fn get_dividends_by_ticker(&self, ticker_id: &str) -> Result<Vec<Dividend>>;
    async fn create_dividend(&self, new_dividend: NewDividend) -> Result<Dividend>;
    async fn update_dividend(&self, update: DividendUpdate) -> Result<Dividend>;
    async fn delete_dividend(&self, dividend_id: &str) -> Result<()>;
}

#[async_trait]
pub trait DividendServiceTrait: Send + Sync {
    fn get_dividend(&self, dividend_id: &str) -> Result<Dividend>;
    fn get_dividends(&self) -> Result<Vec<Dividend>>;
    fn get_dividends_by_ticker(&self, ticker_id: &str) -> Result<Vec<Dividend>>;
    async fn create_dividend(&self, new_dividend: NewDividend) -> Result<Dividend>;
    async fn update_dividend(&self, update: DividendUpdate) -> Result<Dividend>;
    async fn delete_dividend(&self, dividend_id: &str) -> Result<()>;
}
