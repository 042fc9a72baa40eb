use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Local, NaiveDate};
use log::{info, warn};
use rust_decimal::Decimal;

use cartera_market_data::provider::FxRateProvider;

use super::fx_errors::FxError;
use super::fx_model::{FxRate, NewFxRate};
use super::fx_traits::{FxRepositoryTrait, FxServiceTrait};
use super::rate_table::RateTable;
use crate::constants::SUPPORTED_CURRENCIES;
use crate::prices::DataSource;
use crate::Result;

/// How far back the first FX sync reaches.
const DEFAULT_FX_HISTORY_DAYS: i64 = 365 * 5;

/// Service for USD/PEN rates: storage, conversion, provider refresh.
pub struct FxService {
    fx_repository: Arc<dyn FxRepositoryTrait>,
    fx_provider: Arc<dyn FxRateProvider>,
}

impl FxService {
    pub fn new(
        fx_repository: Arc<dyn FxRepositoryTrait>,
        fx_provider: Arc<dyn FxRateProvider>,
    ) -> Self {
        Self {
            fx_repository,
            fx_provider,
        }
    }

    fn validate_rate(rate: &NewFxRate) -> Result<()> {
        if rate.usd_pen <= Decimal::ZERO {
            return Err(FxError::InvalidRate(format!(
                "USD/PEN rate must be positive, got {}",
                rate.usd_pen
            ))
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl FxServiceTrait for FxService {
    fn get_rates(&self) -> Result<Vec<FxRate>> {
        self.fx_repository.get_rates()
    }

    fn load_rate_table(&self) -> Result<RateTable> {
        let rows = self.fx_repository.get_rates()?;
        Ok(RateTable::from_pairs(
            rows.into_iter().map(|row| (row.rate_date, row.usd_pen)),
        ))
    }

    fn convert(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
        date: NaiveDate,
    ) -> Result<Option<Decimal>> {
        for currency in [from_currency, to_currency] {
            if !SUPPORTED_CURRENCIES.contains(&currency) {
                return Err(FxError::UnsupportedCurrency(currency.to_string()).into());
            }
        }
        if from_currency == to_currency {
            return Ok(Some(amount));
        }
        let rate = self.fx_repository.get_rate_on_or_before(date)?;
        let table = RateTable::from_pairs(rate.map(|r| (r.rate_date, r.usd_pen)));
        Ok(table.convert(amount, from_currency, to_currency, date))
    }

    async fn upsert_rate(&self, rate: NewFxRate) -> Result<FxRate> {
        Self::validate_rate(&rate)?;
        self.fx_repository.upsert_rate(rate).await
    }

    async fn delete_rate(&self, date: NaiveDate) -> Result<()> {
        self.fx_repository.delete_rate(date).await
    }

    async fn refresh_rates(&self) -> Result<usize> {
        let today = Local::now().date_naive();
        let start = match self.fx_repository.get_last_rate_date()? {
            Some(last) => (last + ChronoDuration::days(1)).min(today),
            None => today - ChronoDuration::days(DEFAULT_FX_HISTORY_DAYS),
        };

        let observations = match self.fx_provider.usd_pen_rates(start, today).await {
            Ok(rows) => rows,
            Err(err) => {
                // Provider trouble downgrades to "nothing synced".
                warn!("FX refresh failed: {}", err);
                return Ok(0);
            }
        };

        let rows: Vec<NewFxRate> = observations
            .into_iter()
            .filter(|obs| obs.rate > Decimal::ZERO)
            .map(|obs| NewFxRate {
                rate_date: obs.date,
                usd_pen: obs.rate,
                source: DataSource::Sbs,
            })
            .collect();

        if rows.is_empty() {
            return Ok(0);
        }
        let stored = self.fx_repository.upsert_rates(rows).await?;
        info!("Stored {} USD/PEN rates from SBS", stored);
        Ok(stored)
    }
}
