use super::tickers_model::{NewTicker, Ticker, TickerUpdate};
use crate::Result;
use async_trait::async_trait;

/// Trait for ticker repository operations.
#[async_trait]
pub trait TickerRepositoryTrait: Send + Sync {
    fn get_ticker(&self, ticker_id: &str) -> Result<Ticker>;
    fn get_tickers(&self) -> Result<Vec<Ticker>>;
    fn get_active_tickers(&self) -> Result<Vec<Ticker>>;
    fn find_by_symbol(&self, symbol: &str) -> Result<Option<Ticker>>;
    async fn create_ticker(&self, new_ticker: NewTicker) -> Result<Ticker>;
    async fn update_ticker(&self, update: TickerUpdate) -> Result<Ticker>;
    async fn set_active(&self, ticker_id: &str, active: bool) -> Result<Ticker>;
    async fn delete_ticker(&self, ticker_id: &str) -> Result<()>;
}

/// Trait for ticker service operations.
#[async_trait]
pub trait TickerServiceTrait: Send + Sync {
    fn get_ticker(&self, ticker_id: &str) -> Result<Ticker>;
    fn get_tickers(&self) -> Result<Vec<Ticker>>;
    fn get_active_tickers(&self) -> Result<Vec<Ticker>>;
    async fn create_ticker(&self, new_ticker: NewTicker) -> Result<Ticker>;
    async fn update_ticker(&self, update: TickerUpdate) -> Result<Ticker>;
    /// Hard-deletes a ticker with no recorded investments; tickers that
    /// are referenced are deactivated instead and keep their history.
    async fn delete_ticker(&self, ticker_id: &str) -> Result<()>;
}
