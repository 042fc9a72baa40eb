use log::info;
use std::sync::Arc;

use super::tickers_model::{NewTicker, Ticker, TickerUpdate};
use super::tickers_traits::{TickerRepositoryTrait, TickerServiceTrait};
use crate::constants::{INSTRUMENT_TYPES, SUPPORTED_CURRENCIES};
use crate::errors::{DatabaseError, ValidationError};
use crate::investments::InvestmentRepositoryTrait;
use crate::{Error, Result};
use async_trait::async_trait;

/// Service for managing tickers.
pub struct TickerService {
    ticker_repository: Arc<dyn TickerRepositoryTrait>,
    investment_repository: Arc<dyn InvestmentRepositoryTrait>,
}

impl TickerService {
    pub fn new(
        ticker_repository: Arc<dyn TickerRepositoryTrait>,
        investment_repository: Arc<dyn InvestmentRepositoryTrait>,
    ) -> Self {
        Self {
            ticker_repository,
            investment_repository,
        }
    }

    fn validate_fields(symbol: &str, currency: &str, instrument_type: &str) -> Result<()> {
        if symbol.trim().is_empty() {
            return Err(ValidationError::MissingField("symbol".to_string()).into());
        }
        if !SUPPORTED_CURRENCIES.contains(&currency) {
            return Err(ValidationError::InvalidInput(format!(
                "Unsupported currency '{}'",
                currency
            ))
            .into());
        }
        if !INSTRUMENT_TYPES.contains(&instrument_type) {
            return Err(ValidationError::InvalidInput(format!(
                "Unknown instrument type '{}'",
                instrument_type
            ))
            .into());
        }
        Ok(())
    }

    /// Symbol must be unique among active tickers. `exclude_id` lets an
    /// update keep its own symbol.
    fn check_symbol_available(&self, symbol: &str, exclude_id: Option<&str>) -> Result<()> {
        if let Some(existing) = self.ticker_repository.find_by_symbol(symbol)? {
            if existing.is_active && Some(existing.id.as_str()) != exclude_id {
                return Err(Error::Database(DatabaseError::UniqueViolation(format!(
                    "An active ticker with symbol '{}' already exists",
                    symbol
                ))));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TickerServiceTrait for TickerService {
    fn get_ticker(&self, ticker_id: &str) -> Result<Ticker> {
        self.ticker_repository.get_ticker(ticker_id)
    }

    fn get_tickers(&self) -> Result<Vec<Ticker>> {
        self.ticker_repository.get_tickers()
    }

    fn get_active_tickers(&self) -> Result<Vec<Ticker>> {
        self.ticker_repository.get_active_tickers()
    }

    async fn create_ticker(&self, new_ticker: NewTicker) -> Result<Ticker> {
        Self::validate_fields(
            &new_ticker.symbol,
            &new_ticker.currency,
            &new_ticker.instrument_type,
        )?;
        self.check_symbol_available(&new_ticker.symbol, None)?;
        self.ticker_repository.create_ticker(new_ticker).await
    }

    async fn update_ticker(&self, update: TickerUpdate) -> Result<Ticker> {
        Self::validate_fields(&update.symbol, &update.currency, &update.instrument_type)?;
        self.check_symbol_available(&update.symbol, Some(&update.id))?;
        self.ticker_repository.update_ticker(update).await
    }

    async fn delete_ticker(&self, ticker_id: &str) -> Result<()> {
        let referenced = self
            .investment_repository
            .count_for_ticker(ticker_id)?
            > 0;
        if referenced {
            info!("Ticker {} has investments; deactivating instead of deleting", ticker_id);
            self.ticker_repository.set_active(ticker_id, false).await?;
            return Ok(());
        }
        self.ticker_repository.delete_ticker(ticker_id).await
    }
}
