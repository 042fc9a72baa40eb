//! Provider trait definitions.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::MarketDataError;
use crate::models::{PriceRequest, ProviderFxRate, ProviderPrice};

/// A source of daily closing prices.
///
/// Implementations are stateless apart from their HTTP client and
/// credentials; the chain decides ordering via `priority` and skips
/// providers whose `supports` returns false for a request.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Stable identifier, e.g. "POLYGON". Used in attempt records and
    /// persisted as the price source.
    fn id(&self) -> &'static str;

    /// Lower value = tried earlier. Default 10.
    fn priority(&self) -> u8 {
        10
    }

    /// Whether this provider can serve the request at all. Providers
    /// limited to one market (BVL) override this.
    fn supports(&self, request: &PriceRequest) -> bool {
        let _ = request;
        true
    }

    /// Daily closing prices for the request's date range, ascending by
    /// date. An empty vector means the provider had no rows, which the
    /// chain treats as a miss rather than an error.
    async fn historical_prices(
        &self,
        request: &PriceRequest,
    ) -> Result<Vec<ProviderPrice>, MarketDataError>;
}

/// A source of daily USD/PEN reference rates.
#[async_trait]
pub trait FxRateProvider: Send + Sync {
    fn id(&self) -> &'static str;

    /// USD/PEN observations for the date range, ascending by date.
    async fn usd_pen_rates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ProviderFxRate>, MarketDataError>;
}
