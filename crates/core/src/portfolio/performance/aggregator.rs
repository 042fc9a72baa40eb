//! The period aggregator.
//!
//! Walks calendar periods over one or more positions and produces the
//! per-period valuation/flow/return records every report view is built
//! from. Period returns chain geometrically: the cumulative figure is
//! `PRODUCT(1 + Rn) - 1`, never a sum of period rates.
//!
//! Data-gap rules, applied consistently everywhere:
//! - a boundary date with no stored price uses the most recent earlier
//!   price; with no earlier price at all the position is worth zero;
//! - a period with no price observations still emits a record with
//!   boundary values carried from the last known price, so a flowless
//!   gap period shows a zero return;
//! - an amount whose currency cannot be converted on its date (no FX
//!   rate on or before it) is omitted from the total, with a warning.

use chrono::{Duration, NaiveDate};
use log::warn;
use rust_decimal::Decimal;

use crate::constants::DECIMAL_PRECISION;
use crate::fx::RateTable;
use crate::investments::CashFlow;
use crate::prices::PriceSeries;

use super::performance_model::PeriodPerformance;
use super::period::{period_boundaries, PeriodInterval};

/// A dividend payment feeding the aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct DividendFlow {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub currency: String,
}

/// Everything the aggregator needs to know about one position.
#[derive(Debug, Clone)]
pub struct TickerSeries {
    pub ticker_id: String,
    /// Currency the flows, dividends and prices are quoted in.
    pub currency: String,
    pub flows: Vec<CashFlow>,
    pub dividends: Vec<DividendFlow>,
    pub prices: PriceSeries,
}

impl TickerSeries {
    fn quantity_as_of(&self, date: NaiveDate) -> Decimal {
        self.flows
            .iter()
            .filter(|flow| flow.date <= date)
            .map(|flow| flow.quantity_delta)
            .sum()
    }

    /// Mark-to-market in the position's own currency. Zero when the
    /// position is empty or no price exists on or before the date.
    fn value_at(&self, date: NaiveDate) -> Decimal {
        let quantity = self.quantity_as_of(date);
        if quantity.is_zero() {
            return Decimal::ZERO;
        }
        match self.prices.on_or_before(date) {
            Some(price) => quantity * price,
            None => Decimal::ZERO,
        }
    }
}

fn convert_or_skip(
    amount: Decimal,
    from_currency: &str,
    reporting_currency: &str,
    date: NaiveDate,
    rates: &RateTable,
    what: &str,
) -> Decimal {
    match rates.convert(amount, from_currency, reporting_currency, date) {
        Some(converted) => converted,
        None => {
            warn!(
                "No {}->{} rate on or before {}; omitting {} of {}",
                from_currency, reporting_currency, date, what, amount
            );
            Decimal::ZERO
        }
    }
}

/// Aggregates the positions into one record per calendar period.
///
/// `from` defaults to the earliest flow across the positions; with no
/// flows at all there is nothing to report and the result is empty.
pub fn aggregate_periods(
    positions: &[TickerSeries],
    reporting_currency: &str,
    rates: &RateTable,
    interval: PeriodInterval,
    from: Option<NaiveDate>,
    to: NaiveDate,
) -> Vec<PeriodPerformance> {
    let first_flow = positions
        .iter()
        .flat_map(|p| p.flows.iter().map(|f| f.date))
        .min();
    let start = match from.or(first_flow) {
        Some(date) => date,
        None => return Vec::new(),
    };

    let one = Decimal::ONE;
    let mut cumulative_growth = one;
    let mut peak_growth = one;
    let mut max_drawdown = Decimal::ZERO;
    let mut records = Vec::new();

    for (period_start, period_end) in period_boundaries(interval, start, to) {
        let day_before = period_start - Duration::days(1);

        let mut opening_value = Decimal::ZERO;
        let mut closing_value = Decimal::ZERO;
        let mut contributions = Decimal::ZERO;
        let mut dividends = Decimal::ZERO;

        for position in positions {
            opening_value += convert_or_skip(
                position.value_at(day_before),
                &position.currency,
                reporting_currency,
                day_before,
                rates,
                "opening value",
            );
            closing_value += convert_or_skip(
                position.value_at(period_end),
                &position.currency,
                reporting_currency,
                period_end,
                rates,
                "closing value",
            );

            for flow in &position.flows {
                if flow.date < period_start || flow.date > period_end {
                    continue;
                }
                if !flow.is_new_capital {
                    continue;
                }
                contributions += convert_or_skip(
                    flow.amount,
                    &position.currency,
                    reporting_currency,
                    flow.date,
                    rates,
                    "contribution",
                );
            }

            for dividend in &position.dividends {
                if dividend.date < period_start || dividend.date > period_end {
                    continue;
                }
                dividends += convert_or_skip(
                    dividend.amount,
                    &dividend.currency,
                    reporting_currency,
                    dividend.date,
                    rates,
                    "dividend",
                );
            }
        }

        let gain = closing_value - opening_value - contributions + dividends;

        // Rn guards the degenerate first-period case: with no opening
        // balance the contribution is the base, and with neither the
        // period simply returns zero.
        let return_rate = if opening_value > Decimal::ZERO {
            gain / opening_value
        } else if !contributions.is_zero() {
            gain / contributions
        } else {
            Decimal::ZERO
        };

        cumulative_growth *= one + return_rate;
        let cumulative_return = cumulative_growth - one;

        peak_growth = peak_growth.max(cumulative_growth);
        if peak_growth > Decimal::ZERO {
            let drawdown = (cumulative_growth - peak_growth) / peak_growth;
            max_drawdown = max_drawdown.min(drawdown);
        }

        records.push(PeriodPerformance {
            period_start,
            period_end,
            opening_value: opening_value.round_dp(DECIMAL_PRECISION),
            contributions: contributions.round_dp(DECIMAL_PRECISION),
            dividends: dividends.round_dp(DECIMAL_PRECISION),
            closing_value: closing_value.round_dp(DECIMAL_PRECISION),
            gain: gain.round_dp(DECIMAL_PRECISION),
            return_rate: return_rate.round_dp(DECIMAL_PRECISION),
            cumulative_return: cumulative_return.round_dp(DECIMAL_PRECISION),
            max_drawdown: max_drawdown.round_dp(DECIMAL_PRECISION),
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn flow(d: NaiveDate, amount: Decimal, quantity: Decimal, new_capital: bool) -> CashFlow {
        CashFlow {
            date: d,
            amount,
            quantity_delta: quantity,
            is_new_capital: new_capital,
        }
    }

    fn usd_position(
        flows: Vec<CashFlow>,
        dividends: Vec<DividendFlow>,
        prices: Vec<(NaiveDate, Decimal)>,
    ) -> TickerSeries {
        TickerSeries {
            ticker_id: "t1".to_string(),
            currency: "USD".to_string(),
            flows,
            dividends,
            prices: PriceSeries::from_pairs(prices),
        }
    }

    fn aggregate_usd(positions: &[TickerSeries], to: NaiveDate) -> Vec<PeriodPerformance> {
        aggregate_periods(
            positions,
            "USD",
            &RateTable::new(),
            PeriodInterval::Monthly,
            None,
            to,
        )
    }

    #[test]
    fn single_investment_first_month() {
        // $1,000 buys 10 units at $100 on Jan 1; $110 by Jan 31.
        let position = usd_position(
            vec![flow(date(2024, 1, 1), dec!(1000), dec!(10), true)],
            Vec::new(),
            vec![(date(2024, 1, 1), dec!(100)), (date(2024, 1, 31), dec!(110))],
        );
        let records = aggregate_usd(&[position], date(2024, 1, 31));

        assert_eq!(records.len(), 1);
        let january = &records[0];
        assert_eq!(january.opening_value, dec!(0));
        assert_eq!(january.contributions, dec!(1000));
        assert_eq!(january.closing_value, dec!(1100));
        assert_eq!(january.gain, dec!(100));
        assert_eq!(january.return_rate, dec!(0.1));
        assert_eq!(january.cumulative_return, dec!(0.1));
    }

    #[test]
    fn cumulative_return_chains_geometrically() {
        // Engineered period returns of 10%, -5%, 20%:
        // 100 units, prices 11.00 / 10.45 / 12.54 at month ends.
        let position = usd_position(
            vec![flow(date(2023, 1, 2), dec!(1000), dec!(100), true)],
            Vec::new(),
            vec![
                (date(2023, 1, 31), dec!(11)),
                (date(2023, 2, 28), dec!(10.45)),
                (date(2023, 3, 31), dec!(12.54)),
            ],
        );
        let records = aggregate_usd(&[position], date(2023, 3, 31));

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].return_rate, dec!(0.1));
        assert_eq!(records[1].return_rate, dec!(-0.05));
        assert_eq!(records[2].return_rate, dec!(0.2));
        // 1.10 * 0.95 * 1.20 - 1 = 25.4%, not the naive 25%.
        assert_eq!(records[2].cumulative_return, dec!(0.254));
        assert_ne!(records[2].cumulative_return, dec!(0.25));
    }

    #[test]
    fn max_drawdown_tracks_worst_decline_as_negative() {
        let position = usd_position(
            vec![flow(date(2023, 1, 2), dec!(1000), dec!(100), true)],
            Vec::new(),
            vec![
                (date(2023, 1, 31), dec!(11)),
                (date(2023, 2, 28), dec!(10.45)),
                (date(2023, 3, 31), dec!(12.54)),
            ],
        );
        let records = aggregate_usd(&[position], date(2023, 3, 31));

        assert_eq!(records[0].max_drawdown, dec!(0));
        // Trough at 1.045 against the 1.10 peak.
        assert_eq!(records[1].max_drawdown, dec!(-0.05));
        // Recovery does not shrink the recorded drawdown.
        assert_eq!(records[2].max_drawdown, dec!(-0.05));
    }

    #[test]
    fn empty_period_returns_zero_not_division_error() {
        // Window opens two months before the first flow.
        let position = usd_position(
            vec![flow(date(2024, 3, 10), dec!(1000), dec!(10), true)],
            Vec::new(),
            vec![(date(2024, 3, 28), dec!(105))],
        );
        let records = aggregate_periods(
            &[position],
            "USD",
            &RateTable::new(),
            PeriodInterval::Monthly,
            Some(date(2024, 1, 1)),
            date(2024, 3, 31),
        );

        assert_eq!(records.len(), 3);
        for empty in &records[..2] {
            assert_eq!(empty.opening_value, dec!(0));
            assert_eq!(empty.contributions, dec!(0));
            assert_eq!(empty.return_rate, dec!(0));
        }
        assert_eq!(records[2].contributions, dec!(1000));
    }

    #[test]
    fn gap_period_carries_value_forward_with_zero_return() {
        // No February price and no February flows: boundary values
        // carry the January price, return is zero.
        let position = usd_position(
            vec![flow(date(2024, 1, 5), dec!(1000), dec!(10), true)],
            Vec::new(),
            vec![
                (date(2024, 1, 31), dec!(110)),
                (date(2024, 3, 15), dec!(120)),
            ],
        );
        let records = aggregate_usd(&[position], date(2024, 3, 31));

        let february = &records[1];
        assert_eq!(february.opening_value, dec!(1100));
        assert_eq!(february.closing_value, dec!(1100));
        assert_eq!(february.return_rate, dec!(0));

        let march = &records[2];
        assert_eq!(march.closing_value, dec!(1200));
    }

    #[test]
    fn reinvestment_moves_quantity_but_not_contributions() {
        let position = usd_position(
            vec![
                flow(date(2024, 1, 2), dec!(1000), dec!(10), true),
                // Reinvested proceeds buy 5 more units in February.
                flow(date(2024, 2, 10), dec!(550), dec!(5), false),
            ],
            Vec::new(),
            vec![
                (date(2024, 1, 31), dec!(110)),
                (date(2024, 2, 29), dec!(110)),
            ],
        );
        let records = aggregate_usd(&[position], date(2024, 2, 29));

        let february = &records[1];
        assert_eq!(february.contributions, dec!(0));
        // 15 units valued at 110.
        assert_eq!(february.closing_value, dec!(1650));
    }

    #[test]
    fn dividends_credit_return_not_contributions() {
        let position = usd_position(
            vec![flow(date(2024, 1, 2), dec!(1000), dec!(10), true)],
            vec![DividendFlow {
                date: date(2024, 1, 20),
                amount: dec!(30),
                currency: "USD".to_string(),
            }],
            vec![(date(2024, 1, 31), dec!(100))],
        );
        let records = aggregate_usd(&[position], date(2024, 1, 31));

        let january = &records[0];
        assert_eq!(january.contributions, dec!(1000));
        assert_eq!(january.dividends, dec!(30));
        // Vf - Vi - F + D = 1000 - 0 - 1000 + 30.
        assert_eq!(january.gain, dec!(30));
        assert_eq!(january.return_rate, dec!(0.03));
    }

    #[test]
    fn divestment_reduces_contributions_and_quantity() {
        let position = usd_position(
            vec![
                flow(date(2024, 1, 2), dec!(1000), dec!(10), true),
                flow(date(2024, 2, 15), dec!(-440), dec!(-4), true),
            ],
            Vec::new(),
            vec![
                (date(2024, 1, 31), dec!(110)),
                (date(2024, 2, 29), dec!(110)),
            ],
        );
        let records = aggregate_usd(&[position], date(2024, 2, 29));

        let february = &records[1];
        assert_eq!(february.opening_value, dec!(1100));
        assert_eq!(february.contributions, dec!(-440));
        // 6 units left at 110.
        assert_eq!(february.closing_value, dec!(660));
        // 660 - 1100 + 440 = 0: selling at the carrying price is flat.
        assert_eq!(february.gain, dec!(0));
        assert_eq!(february.return_rate, dec!(0));
    }

    #[test]
    fn pen_position_converts_into_usd_reporting() {
        let position = TickerSeries {
            ticker_id: "pe1".to_string(),
            currency: "PEN".to_string(),
            flows: vec![flow(date(2024, 1, 2), dec!(3700), dec!(100), true)],
            dividends: Vec::new(),
            prices: PriceSeries::from_pairs([(date(2024, 1, 31), dec!(40.70))]),
        };
        // 3.70 PEN per USD throughout January.
        let rates = RateTable::from_pairs([(date(2024, 1, 1), dec!(3.70))]);
        let records = aggregate_periods(
            &[position],
            "USD",
            &rates,
            PeriodInterval::Monthly,
            None,
            date(2024, 1, 31),
        );

        let january = &records[0];
        // 3700 PEN contributed = 1000 USD; 4070 PEN closing = 1100 USD.
        assert_eq!(january.contributions, dec!(1000));
        assert_eq!(january.closing_value, dec!(1100));
        assert_eq!(january.return_rate, dec!(0.1));
    }

    #[test]
    fn unconvertible_amounts_are_omitted() {
        let position = TickerSeries {
            ticker_id: "pe1".to_string(),
            currency: "PEN".to_string(),
            flows: vec![flow(date(2024, 1, 2), dec!(3700), dec!(100), true)],
            dividends: Vec::new(),
            prices: PriceSeries::from_pairs([(date(2024, 1, 31), dec!(37))]),
        };
        // No FX rate at all: every PEN leg drops out softly.
        let records = aggregate_periods(
            &[position],
            "USD",
            &RateTable::new(),
            PeriodInterval::Monthly,
            None,
            date(2024, 1, 31),
        );

        let january = &records[0];
        assert_eq!(january.contributions, dec!(0));
        assert_eq!(january.closing_value, dec!(0));
        assert_eq!(january.return_rate, dec!(0));
    }

    #[test]
    fn no_flows_means_no_report() {
        assert!(aggregate_usd(&[], date(2024, 3, 31)).is_empty());
        let flowless = usd_position(
            Vec::new(),
            Vec::new(),
            vec![(date(2024, 1, 31), dec!(100))],
        );
        assert!(aggregate_usd(&[flowless], date(2024, 3, 31)).is_empty());
    }

    #[test]
    fn two_positions_consolidate() {
        let a = usd_position(
            vec![flow(date(2024, 1, 2), dec!(1000), dec!(10), true)],
            Vec::new(),
            vec![(date(2024, 1, 31), dec!(110))],
        );
        let mut b = usd_position(
            vec![flow(date(2024, 1, 10), dec!(500), dec!(5), true)],
            Vec::new(),
            vec![(date(2024, 1, 31), dec!(90))],
        );
        b.ticker_id = "t2".to_string();

        let records = aggregate_usd(&[a, b], date(2024, 1, 31));
        let january = &records[0];
        assert_eq!(january.contributions, dec!(1500));
        // 1100 + 450.
        assert_eq!(january.closing_value, dec!(1550));
        assert_eq!(january.gain, dec!(50));
    }
}
