use super::fx_model::{FxRate, NewFxRate};
use super::rate_table::RateTable;
use crate::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Trait for FX rate repository operations.
#[async_trait]
pub trait FxRepositoryTrait: Send + Sync {
    fn get_rates(&self) -> Result<Vec<FxRate>>;
    fn get_rate_on_or_before(&self, date: NaiveDate) -> Result<Option<FxRate>>;
    fn get_last_rate_date(&self) -> Result<Option<NaiveDate>>;
    async fn upsert_rate(&self, rate: NewFxRate) -> Result<FxRate>;
    async fn upsert_rates(&self, rates: Vec<NewFxRate>) -> Result<usize>;
    async fn delete_rate(&self, date: NaiveDate) -> Result<()>;
}

/// Trait for FX service operations.
#[async_trait]
pub trait FxServiceTrait: Send + Sync {
    fn get_rates(&self) -> Result<Vec<FxRate>>;
    /// All stored rates loaded into the lookup table the aggregator
    /// uses.
    fn load_rate_table(&self) -> Result<RateTable>;
    /// One-off conversion. `Ok(None)` when no rate exists on or before
    /// the date - the caller decides whether that is an error.
    fn convert(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
        date: NaiveDate,
    ) -> Result<Option<Decimal>>;
    async fn upsert_rate(&self, rate: NewFxRate) -> Result<FxRate>;
    async fn delete_rate(&self, date: NaiveDate) -> Result<()>;
    /// Pulls missing daily rates from the SBS provider. Soft-fails to
    /// an empty count when the provider is down.
    async fn refresh_rates(&self) -> Result<usize>;
}
