use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use log::warn;

use crate::constants::{INSTRUMENT_TYPE_INDEX, SUPPORTED_CURRENCIES};
use crate::dividends::DividendRepositoryTrait;
use crate::errors::{CalculatorError, ValidationError};
use crate::fx::{FxRepositoryTrait, RateTable};
use crate::investments::{extract_cash_flows, Investment, InvestmentRepositoryTrait};
use crate::prices::{PriceRepositoryTrait, PriceSeries};
use crate::tickers::{Ticker, TickerRepositoryTrait};
use crate::Result;

use super::aggregator::{aggregate_periods, DividendFlow, TickerSeries};
use super::benchmark::merge_benchmark;
use super::performance_model::{
    BenchmarkedPeriod, PerformanceReport, PeriodPerformance, ReportScope,
};
use super::period::PeriodInterval;

/// Trait for performance report operations.
pub trait PerformanceServiceTrait: Send + Sync {
    fn performance_report(
        &self,
        scope: &ReportScope,
        interval: PeriodInterval,
        currency: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<PerformanceReport>;

    fn benchmark_report(
        &self,
        scope: &ReportScope,
        interval: PeriodInterval,
        currency: &str,
        benchmark_symbol: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<BenchmarkedPeriod>>;
}

/// Assembles event/price/FX data per scope and runs the aggregator.
/// Every view goes through the same routine; only the event filter
/// differs.
pub struct PerformanceService {
    ticker_repository: Arc<dyn TickerRepositoryTrait>,
    investment_repository: Arc<dyn InvestmentRepositoryTrait>,
    dividend_repository: Arc<dyn DividendRepositoryTrait>,
    price_repository: Arc<dyn PriceRepositoryTrait>,
    fx_repository: Arc<dyn FxRepositoryTrait>,
}

impl PerformanceService {
    pub fn new(
        ticker_repository: Arc<dyn TickerRepositoryTrait>,
        investment_repository: Arc<dyn InvestmentRepositoryTrait>,
        dividend_repository: Arc<dyn DividendRepositoryTrait>,
        price_repository: Arc<dyn PriceRepositoryTrait>,
        fx_repository: Arc<dyn FxRepositoryTrait>,
    ) -> Self {
        Self {
            ticker_repository,
            investment_repository,
            dividend_repository,
            price_repository,
            fx_repository,
        }
    }

    fn event_in_scope(
        scope: &ReportScope,
        event: &Investment,
        ticker: &Ticker,
    ) -> bool {
        match scope {
            ReportScope::Portfolio => true,
            ReportScope::Ticker(id) => &event.ticker_id == id,
            ReportScope::Platform(id) => event.platform_id.as_deref() == Some(id.as_str()),
            ReportScope::Exchange(id) => event.exchange_id.as_deref() == Some(id.as_str()),
            ReportScope::InstrumentType(t) => &ticker.instrument_type == t,
        }
    }

    fn build_positions(&self, scope: &ReportScope) -> Result<Vec<TickerSeries>> {
        let tickers: HashMap<String, Ticker> = self
            .ticker_repository
            .get_tickers()?
            .into_iter()
            .map(|t| (t.id.clone(), t))
            .collect();

        let events = match scope {
            ReportScope::Ticker(id) => {
                self.investment_repository.get_investments_by_ticker(id)?
            }
            _ => self.investment_repository.get_investments()?,
        };

        // BTreeMap keeps position order deterministic across runs.
        let mut grouped: BTreeMap<String, Vec<Investment>> = BTreeMap::new();
        for event in events {
            let ticker = match tickers.get(&event.ticker_id) {
                Some(t) => t,
                None => {
                    warn!("Investment {} references unknown ticker {}", event.id, event.ticker_id);
                    continue;
                }
            };
            if ticker.instrument_type == INSTRUMENT_TYPE_INDEX {
                continue;
            }
            if !Self::event_in_scope(scope, &event, ticker) {
                continue;
            }
            grouped.entry(event.ticker_id.clone()).or_default().push(event);
        }

        let mut positions = Vec::with_capacity(grouped.len());
        for (ticker_id, ticker_events) in grouped {
            let ticker = &tickers[&ticker_id];
            let flows = extract_cash_flows(&ticker_events);
            let dividends = self
                .dividend_repository
                .get_dividends_by_ticker(&ticker_id)?
                .into_iter()
                .map(|d| DividendFlow {
                    date: d.pay_date,
                    amount: d.amount,
                    currency: d.currency,
                })
                .collect();
            let prices = PriceSeries::from_pairs(
                self.price_repository
                    .get_prices_for_ticker(&ticker_id)?
                    .into_iter()
                    .map(|p| (p.price_date, p.price)),
            );
            positions.push(TickerSeries {
                ticker_id,
                currency: ticker.currency.clone(),
                flows,
                dividends,
                prices,
            });
        }
        Ok(positions)
    }

    fn load_rate_table(&self) -> Result<RateTable> {
        let rows = self.fx_repository.get_rates()?;
        Ok(RateTable::from_pairs(
            rows.into_iter().map(|r| (r.rate_date, r.usd_pen)),
        ))
    }

    fn resolve_range(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<(Option<NaiveDate>, NaiveDate)> {
        let to = to.unwrap_or_else(|| Local::now().date_naive());
        if let Some(from_date) = from {
            if from_date > to {
                return Err(CalculatorError::InvalidRange(format!(
                    "start {} is after end {}",
                    from_date, to
                ))
                .into());
            }
        }
        Ok((from, to))
    }
}

impl PerformanceServiceTrait for PerformanceService {
    fn performance_report(
        &self,
        scope: &ReportScope,
        interval: PeriodInterval,
        currency: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<PerformanceReport> {
        if !SUPPORTED_CURRENCIES.contains(&currency) {
            return Err(ValidationError::InvalidInput(format!(
                "Unsupported reporting currency '{}'",
                currency
            ))
            .into());
        }
        let (from, to) = Self::resolve_range(from, to)?;
        let positions = self.build_positions(scope)?;
        let rates = self.load_rate_table()?;

        let periods: Vec<PeriodPerformance> =
            aggregate_periods(&positions, currency, &rates, interval, from, to);

        Ok(PerformanceReport {
            scope: scope.describe(),
            currency: currency.to_string(),
            interval,
            periods,
        })
    }

    fn benchmark_report(
        &self,
        scope: &ReportScope,
        interval: PeriodInterval,
        currency: &str,
        benchmark_symbol: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<BenchmarkedPeriod>> {
        let report = self.performance_report(scope, interval, currency, from, to)?;

        let index_ticker = self
            .ticker_repository
            .find_by_symbol(benchmark_symbol)?
            .ok_or_else(|| CalculatorError::UnknownBenchmark(benchmark_symbol.to_string()))?;
        let benchmark_prices = PriceSeries::from_pairs(
            self.price_repository
                .get_prices_for_ticker(&index_ticker.id)?
                .into_iter()
                .map(|p| (p.price_date, p.price)),
        );

        Ok(merge_benchmark(&report.periods, &benchmark_prices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dividends::{Dividend, DividendUpdate, NewDividend};
    use crate::errors::DatabaseError;
    use crate::fx::{FxRate, NewFxRate};
    use crate::investments::{
        CapitalOrigin, InvestmentUpdate, NewInvestment, OperationType,
    };
    use crate::prices::{DataSource, HistoricalPrice, NewPrice};
    use crate::tickers::{NewTicker, TickerUpdate};
    use crate::Error;
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// In-memory store backing all five repository traits.
    #[derive(Default)]
    struct Fixture {
        tickers: Vec<Ticker>,
        investments: Vec<Investment>,
        dividends: Vec<Dividend>,
        prices: Vec<HistoricalPrice>,
        fx_rates: Vec<FxRate>,
    }

    #[async_trait]
    impl TickerRepositoryTrait for Fixture {
        fn get_ticker(&self, ticker_id: &str) -> Result<Ticker> {
            self.tickers
                .iter()
                .find(|t| t.id == ticker_id)
                .cloned()
                .ok_or_else(|| DatabaseError::NotFound(ticker_id.to_string()).into())
        }
        fn get_tickers(&self) -> Result<Vec<Ticker>> {
            Ok(self.tickers.clone())
        }
        fn get_active_tickers(&self) -> Result<Vec<Ticker>> {
            Ok(self.tickers.iter().filter(|t| t.is_active).cloned().collect())
        }
        fn find_by_symbol(&self, symbol: &str) -> Result<Option<Ticker>> {
            Ok(self.tickers.iter().find(|t| t.symbol == symbol).cloned())
        }
        async fn create_ticker(&self, _new: NewTicker) -> Result<Ticker> {
            unimplemented!()
        }
        async fn update_ticker(&self, _update: TickerUpdate) -> Result<Ticker> {
            unimplemented!()
        }
        async fn set_active(&self, _id: &str, _active: bool) -> Result<Ticker> {
            unimplemented!()
        }
        async fn delete_ticker(&self, _id: &str) -> Result<()> {
            unimplemented!()
        }
    }

    #[async_trait]
    impl InvestmentRepositoryTrait for Fixture {
        fn get_investment(&self, id: &str) -> Result<Investment> {
            Err(DatabaseError::NotFound(id.to_string()).into())
        }
        fn get_investments(&self) -> Result<Vec<Investment>> {
            Ok(self.investments.clone())
        }
        fn get_investments_by_ticker(&self, ticker_id: &str) -> Result<Vec<Investment>> {
            Ok(self
                .investments
                .iter()
                .filter(|i| i.ticker_id == ticker_id)
                .cloned()
                .collect())
        }
        fn count_for_ticker(&self, ticker_id: &str) -> Result<i64> {
            Ok(self.get_investments_by_ticker(ticker_id)?.len() as i64)
        }
        fn net_quantity_as_of(
            &self,
            _ticker_id: &str,
            _as_of: NaiveDate,
            _exclude_id: Option<&str>,
        ) -> Result<Decimal> {
            Ok(Decimal::ZERO)
        }
        async fn create_investment(&self, _new: NewInvestment) -> Result<Investment> {
            unimplemented!()
        }
        async fn update_investment(&self, _update: InvestmentUpdate) -> Result<Investment> {
            unimplemented!()
        }
        async fn delete_investment(&self, _id: &str) -> Result<()> {
            unimplemented!()
        }
    }

    #[async_trait]
    impl DividendRepositoryTrait for Fixture {
        fn get_dividend(&self, id: &str) -> Result<Dividend> {
            Err(DatabaseError::NotFound(id.to_string()).into())
        }
        fn get_dividends(&self) -> Result<Vec<Dividend>> {
            Ok(self.dividends.clone())
        }
        fn get_dividends_by_ticker(&self, ticker_id: &str) -> Result<Vec<Dividend>> {
            Ok(self
                .dividends
                .iter()
                .filter(|d| d.ticker_id == ticker_id)
                .cloned()
                .collect())
        }
        async fn create_dividend(&self, _new: NewDividend) -> Result<Dividend> {
            unimplemented!()
        }
        async fn update_dividend(&self, _update: DividendUpdate) -> Result<Dividend> {
            unimplemented!()
        }
        async fn delete_dividend(&self, _id: &str) -> Result<()> {
            unimplemented!()
        }
    }

    #[async_trait]
    impl PriceRepositoryTrait for Fixture {
        fn get_prices_for_ticker(&self, ticker_id: &str) -> Result<Vec<HistoricalPrice>> {
            Ok(self
                .prices
                .iter()
                .filter(|p| p.ticker_id == ticker_id)
                .cloned()
                .collect())
        }
        fn get_price_on_or_before(
            &self,
            _ticker_id: &str,
            _date: NaiveDate,
        ) -> Result<Option<HistoricalPrice>> {
            Ok(None)
        }
        fn get_last_price_date(&self, _ticker_id: &str) -> Result<Option<NaiveDate>> {
            Ok(None)
        }
        async fn upsert_price(&self, _price: NewPrice) -> Result<HistoricalPrice> {
            unimplemented!()
        }
        async fn upsert_prices(&self, _prices: Vec<NewPrice>) -> Result<usize> {
            unimplemented!()
        }
        async fn delete_price(&self, _ticker_id: &str, _date: NaiveDate) -> Result<()> {
            unimplemented!()
        }
    }

    #[async_trait]
    impl FxRepositoryTrait for Fixture {
        fn get_rates(&self) -> Result<Vec<FxRate>> {
            Ok(self.fx_rates.clone())
        }
        fn get_rate_on_or_before(&self, _date: NaiveDate) -> Result<Option<FxRate>> {
            Ok(None)
        }
        fn get_last_rate_date(&self) -> Result<Option<NaiveDate>> {
            Ok(None)
        }
        async fn upsert_rate(&self, _rate: NewFxRate) -> Result<FxRate> {
            unimplemented!()
        }
        async fn upsert_rates(&self, _rates: Vec<NewFxRate>) -> Result<usize> {
            unimplemented!()
        }
        async fn delete_rate(&self, _date: NaiveDate) -> Result<()> {
            unimplemented!()
        }
    }

    fn ticker(id: &str, symbol: &str, instrument_type: &str) -> Ticker {
        Ticker {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            currency: "USD".to_string(),
            instrument_type: instrument_type.to_string(),
            exchange_id: None,
            country: None,
            sector: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn buy(
        id: &str,
        ticker_id: &str,
        event_date: NaiveDate,
        amount: Decimal,
        quantity: Decimal,
        platform_id: Option<&str>,
    ) -> Investment {
        Investment {
            id: id.to_string(),
            ticker_id: ticker_id.to_string(),
            event_date,
            amount,
            quantity,
            platform_id: platform_id.map(str::to_string),
            exchange_id: None,
            operation: OperationType::Investment,
            capital_origin: CapitalOrigin::FreshCash,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn price(ticker_id: &str, price_date: NaiveDate, value: Decimal) -> HistoricalPrice {
        HistoricalPrice {
            ticker_id: ticker_id.to_string(),
            price_date,
            price: value,
            source: DataSource::Manual,
            updated_at: Utc::now(),
        }
    }

    fn service(fixture: Fixture) -> PerformanceService {
        let shared = Arc::new(fixture);
        PerformanceService::new(
            shared.clone(),
            shared.clone(),
            shared.clone(),
            shared.clone(),
            shared,
        )
    }

    fn two_ticker_fixture() -> Fixture {
        Fixture {
            tickers: vec![
                ticker("t1", "VOO", "ETF"),
                ticker("t2", "AAPL", "STOCK"),
                ticker("idx", "^GSPC", "INDEX"),
            ],
            investments: vec![
                buy("i1", "t1", date(2024, 1, 2), dec!(1000), dec!(10), Some("p1")),
                buy("i2", "t2", date(2024, 1, 10), dec!(500), dec!(5), Some("p2")),
            ],
            dividends: Vec::new(),
            prices: vec![
                price("t1", date(2024, 1, 31), dec!(110)),
                price("t2", date(2024, 1, 31), dec!(90)),
                price("idx", date(2023, 12, 29), dec!(4000)),
                price("idx", date(2024, 1, 31), dec!(4200)),
            ],
            fx_rates: Vec::new(),
        }
    }

    #[test]
    fn portfolio_scope_consolidates_all_tickers() {
        let svc = service(two_ticker_fixture());
        let report = svc
            .performance_report(
                &ReportScope::Portfolio,
                PeriodInterval::Monthly,
                "USD",
                None,
                Some(date(2024, 1, 31)),
            )
            .unwrap();

        assert_eq!(report.periods.len(), 1);
        assert_eq!(report.periods[0].contributions, dec!(1500));
        assert_eq!(report.periods[0].closing_value, dec!(1550));
    }

    #[test]
    fn platform_scope_filters_events() {
        let svc = service(two_ticker_fixture());
        let report = svc
            .performance_report(
                &ReportScope::Platform("p1".to_string()),
                PeriodInterval::Monthly,
                "USD",
                None,
                Some(date(2024, 1, 31)),
            )
            .unwrap();

        assert_eq!(report.periods[0].contributions, dec!(1000));
        assert_eq!(report.periods[0].closing_value, dec!(1100));
    }

    #[test]
    fn instrument_type_scope_uses_ticker_metadata() {
        let svc = service(two_ticker_fixture());
        let report = svc
            .performance_report(
                &ReportScope::InstrumentType("STOCK".to_string()),
                PeriodInterval::Monthly,
                "USD",
                None,
                Some(date(2024, 1, 31)),
            )
            .unwrap();

        assert_eq!(report.periods[0].contributions, dec!(500));
        assert_eq!(report.periods[0].closing_value, dec!(450));
    }

    #[test]
    fn benchmark_report_attaches_alpha() {
        let svc = service(two_ticker_fixture());
        let merged = svc
            .benchmark_report(
                &ReportScope::Ticker("t1".to_string()),
                PeriodInterval::Monthly,
                "USD",
                "^GSPC",
                None,
                Some(date(2024, 1, 31)),
            )
            .unwrap();

        assert_eq!(merged.len(), 1);
        // Ticker made 10%, index made 5%.
        assert_eq!(merged[0].benchmark_cumulative_return, Some(dec!(0.05)));
        assert_eq!(merged[0].alpha, Some(dec!(0.05)));
    }

    #[test]
    fn unknown_benchmark_is_an_error() {
        let svc = service(two_ticker_fixture());
        let err = svc
            .benchmark_report(
                &ReportScope::Portfolio,
                PeriodInterval::Monthly,
                "USD",
                "^NOPE",
                None,
                Some(date(2024, 1, 31)),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Calculation(CalculatorError::UnknownBenchmark(_))
        ));
    }

    #[test]
    fn unsupported_currency_is_rejected() {
        let svc = service(two_ticker_fixture());
        let err = svc
            .performance_report(
                &ReportScope::Portfolio,
                PeriodInterval::Monthly,
                "EUR",
                None,
                None,
            )
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let svc = service(two_ticker_fixture());
        let err = svc
            .performance_report(
                &ReportScope::Portfolio,
                PeriodInterval::Monthly,
                "USD",
                Some(date(2024, 3, 1)),
                Some(date(2024, 1, 1)),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Calculation(CalculatorError::InvalidRange(_))
        ));
    }
}
