use super::investments_model::{Investment, InvestmentUpdate, NewInvestment};
use crate::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Trait for investment repository operations.
#[async_trait]
pub trait InvestmentRepositoryTrait: Send + Sync {
    fn get_investment(&self, investment_id: &str) -> Result<Investment>;
    fn get_investments(&self) -> Result<Vec<Investment>>;
    fn get_investments_by_ticker(&self, ticker_id: &str) -> Result<Vec<Investment>>;
    fn count_for_ticker(&self, ticker_id: &str) -> Result<i64>;
    /// Sum of signed quantities for the ticker on or before `as_of`,
    /// optionally ignoring one event (the one being edited).
    fn net_quantity_as_of(
        &self,
        ticker_id: &str,
        as_of: NaiveDate,
        exclude_id: Option<&str>,
    ) -> Result<Decimal>;
    async fn create_investment(&self, new_investment: NewInvestment) -> Result<Investment>;
    async fn update_investment(&self, update: InvestmentUpdate) -> Result<Investment>;
    async fn delete_investment(&self, investment_id: &str) -> Result<()>;
}

/// Trait for investment service operations.
#[async_trait]
pub trait InvestmentServiceTrait: Send + Sync {
    fn get_investment(&self, investment_id: &str) -> Result<Investment>;
    fn get_investments(&self) -> Result<Vec<Investment>>;
    fn get_investments_by_ticker(&self, ticker_id: &str) -> Result<Vec<Investment>>;
    async fn create_investment(&self, new_investment: NewInvestment) -> Result<Investment>;
    async fn update_investment(&self, update: InvestmentUpdate) -> Result<Investment>;
    async fn delete_investment(&self, investment_id: &str) -> Result<()>;
}
