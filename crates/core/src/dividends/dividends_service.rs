use std::sync::Arc;

use super::dividends_model::{Dividend, DividendUpdate, NewDividend};
use super::dividends_traits::{DividendRepositoryTrait, DividendServiceTrait};
use crate::constants::SUPPORTED_CURRENCIES;
use crate::errors::ValidationError;
use crate::tickers::TickerRepositoryTrait;
use crate::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Service for managing dividends.
pub struct DividendService {
    dividend_repository: Arc<dyn DividendRepositoryTrait>,
    ticker_repository: Arc<dyn TickerRepositoryTrait>,
}

impl DividendService {
    pub fn new(
        dividend_repository: Arc<dyn DividendRepositoryTrait>,
        ticker_repository: Arc<dyn TickerRepositoryTrait>,
    ) -> Self {
        Self {
            dividend_repository,
            ticker_repository,
        }
    }

    fn validate(&self, ticker_id: &str, amount: Decimal, currency: &str) -> Result<()> {
        self.ticker_repository.get_ticker(ticker_id)?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "dividend amount must be positive".to_string(),
            )
            .into());
        }
        if !SUPPORTED_CURRENCIES.contains(&currency) {
            return Err(ValidationError::InvalidInput(format!(
                "Unsupported currency '{}'",
                currency
            ))
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl DividendServiceTrait for DividendService {
    fn get_dividend(&self, dividend_id: &str) -> Result<Dividend> {
        self.dividend_repository.get_dividend(dividend_id)
    }

    fn get_dividends(&self) -> Result<Vec<Dividend>> {
        self.dividend_repository.get_dividends()
    }

    fn get_dividends_by_ticker(&self, ticker_id: &str) -> Result<Vec<Dividend>> {
        self.dividend_repository.get_dividends_by_ticker(ticker_id)
    }

    async fn create_dividend(&self, new_dividend: NewDividend) -> Result<Dividend> {
        self.validate(
            &new_dividend.ticker_id,
            new_dividend.amount,
            &new_dividend.currency,
        )?;
        self.dividend_repository.create_dividend(new_dividend).await
    }

    async fn update_dividend(&self, update: DividendUpdate) -> Result<Dividend> {
        self.validate(&update.ticker_id, update.amount, &update.currency)?;
        self.dividend_repository.update_dividend(update).await
    }

    async fn delete_dividend(&self, dividend_id: &str) -> Result<()> {
        self.dividend_repository.delete_dividend(dividend_id).await
    }
}
