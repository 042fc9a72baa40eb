//! Benchmark comparison.
//!
//! The index series is chained with the same geometric rule as the
//! portfolio. Periods before the index has coverage produce null
//! benchmark figures; the chain starts at the first covered period, so
//! missing early data never leaks a zero or NaN into later periods.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::constants::DECIMAL_PRECISION;
use crate::prices::PriceSeries;

use super::performance_model::{BenchmarkedPeriod, PeriodPerformance};

/// Cumulative benchmark return per period, or `None` where the index
/// series cannot price both period boundaries.
pub fn benchmark_cumulative_returns(
    prices: &PriceSeries,
    periods: &[(NaiveDate, NaiveDate)],
) -> Vec<Option<Decimal>> {
    let one = Decimal::ONE;
    let mut cumulative_growth = one;
    let mut results = Vec::with_capacity(periods.len());

    for (period_start, period_end) in periods {
        let start_price = prices.on_or_before(*period_start - Duration::days(1));
        let end_price = prices.on_or_before(*period_end);

        match (start_price, end_price) {
            (Some(start), Some(end)) if !start.is_zero() => {
                let period_return = end / start - one;
                cumulative_growth *= one + period_return;
                results.push(Some(
                    (cumulative_growth - one).round_dp(DECIMAL_PRECISION),
                ));
            }
            _ => results.push(None),
        }
    }

    results
}

/// Lays the benchmark alongside an already-computed report.
/// `alpha` is the portfolio's cumulative return minus the benchmark's
/// over the same window, null wherever the benchmark is.
pub fn merge_benchmark(
    periods: &[PeriodPerformance],
    benchmark_prices: &PriceSeries,
) -> Vec<BenchmarkedPeriod> {
    let boundaries: Vec<(NaiveDate, NaiveDate)> = periods
        .iter()
        .map(|p| (p.period_start, p.period_end))
        .collect();
    let benchmark = benchmark_cumulative_returns(benchmark_prices, &boundaries);

    periods
        .iter()
        .zip(benchmark)
        .map(|(period, benchmark_cumulative)| BenchmarkedPeriod {
            period_start: period.period_start,
            period_end: period.period_end,
            cumulative_return: period.cumulative_return,
            benchmark_cumulative_return: benchmark_cumulative,
            alpha: benchmark_cumulative.map(|b| {
                (period.cumulative_return - b).round_dp(DECIMAL_PRECISION)
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32, last: u32) -> (NaiveDate, NaiveDate) {
        (date(y, m, 1), date(y, m, last))
    }

    fn period(start: NaiveDate, end: NaiveDate, cumulative: Decimal) -> PeriodPerformance {
        PeriodPerformance {
            period_start: start,
            period_end: end,
            opening_value: dec!(0),
            contributions: dec!(0),
            dividends: dec!(0),
            closing_value: dec!(0),
            gain: dec!(0),
            return_rate: dec!(0),
            cumulative_return: cumulative,
            max_drawdown: dec!(0),
        }
    }

    #[test]
    fn chains_index_returns_geometrically() {
        // 4000 -> 4400 (+10%) -> 4180 (-5%): cumulative 4.5%.
        let prices = PriceSeries::from_pairs([
            (date(2023, 12, 29), dec!(4000)),
            (date(2024, 1, 31), dec!(4400)),
            (date(2024, 2, 29), dec!(4180)),
        ]);
        let periods = [month(2024, 1, 31), month(2024, 2, 29)];

        let returns = benchmark_cumulative_returns(&prices, &periods);
        assert_eq!(returns[0], Some(dec!(0.1)));
        assert_eq!(returns[1], Some(dec!(0.045)));
    }

    #[test]
    fn uncovered_periods_are_null_without_contaminating_later_ones() {
        // Index data only starts at the end of February.
        let prices = PriceSeries::from_pairs([
            (date(2024, 2, 28), dec!(4000)),
            (date(2024, 3, 31), dec!(4400)),
        ]);
        let periods = [month(2024, 1, 31), month(2024, 2, 29), month(2024, 3, 31)];

        let returns = benchmark_cumulative_returns(&prices, &periods);
        assert_eq!(returns[0], None);
        // February cannot price its opening boundary either.
        assert_eq!(returns[1], None);
        // March chains from scratch: +10%, not polluted by the gaps.
        assert_eq!(returns[2], Some(dec!(0.1)));
    }

    #[test]
    fn alpha_is_portfolio_minus_benchmark() {
        let prices = PriceSeries::from_pairs([
            (date(2023, 12, 29), dec!(4000)),
            (date(2024, 1, 31), dec!(4200)),
        ]);
        let periods = [period(date(2024, 1, 1), date(2024, 1, 31), dec!(0.08))];

        let merged = merge_benchmark(&periods, &prices);
        assert_eq!(merged[0].benchmark_cumulative_return, Some(dec!(0.05)));
        assert_eq!(merged[0].alpha, Some(dec!(0.03)));
    }

    #[test]
    fn missing_benchmark_yields_null_alpha() {
        let merged = merge_benchmark(
            &[period(date(2024, 1, 1), date(2024, 1, 31), dec!(0.08))],
            &PriceSeries::new(),
        );
        assert_eq!(merged[0].benchmark_cumulative_return, None);
        assert_eq!(merged[0].alpha, None);
    }
}
