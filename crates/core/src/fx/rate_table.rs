//! In-memory USD/PEN rate table with on-or-before lookup.
//!
//! The lookup only ever walks backwards in time: the rate chosen for a
//! date can never change when newer rates are inserted later, so every
//! conversion is idempotent against future syncs. A date with no rate
//! on or before it converts to `None`; callers omit the leg instead of
//! failing the whole aggregation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::constants::{CURRENCY_PEN, CURRENCY_USD};

#[derive(Debug, Clone, Default)]
pub struct RateTable {
    /// PEN per USD, keyed by rate date.
    rates: BTreeMap<NaiveDate, Decimal>,
}

impl RateTable {
    pub fn new() -> Self {
        RateTable {
            rates: BTreeMap::new(),
        }
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (NaiveDate, Decimal)>) -> Self {
        RateTable {
            rates: pairs.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, date: NaiveDate, usd_pen: Decimal) {
        self.rates.insert(date, usd_pen);
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// PEN-per-USD rate active on `date`: the stored rate for that day
    /// or the most recent earlier one.
    pub fn usd_pen_on_or_before(&self, date: NaiveDate) -> Option<Decimal> {
        self.rates.range(..=date).next_back().map(|(_, r)| *r)
    }

    /// Converts `amount` between USD and PEN using the rate active on
    /// `date`. Same-currency conversion is the identity. Returns `None`
    /// when no usable rate exists on or before the date, or when a
    /// PEN->USD conversion would divide by a zero rate.
    pub fn convert(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
        date: NaiveDate,
    ) -> Option<Decimal> {
        if from_currency == to_currency {
            return Some(amount);
        }
        let rate = self.usd_pen_on_or_before(date)?;
        match (from_currency, to_currency) {
            (CURRENCY_USD, CURRENCY_PEN) => Some(amount * rate),
            (CURRENCY_PEN, CURRENCY_USD) => {
                if rate.is_zero() {
                    None
                } else {
                    Some(amount / rate)
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn exact_date_rate_is_used() {
        let table = RateTable::from_pairs([(date(2024, 3, 15), dec!(3.70))]);
        assert_eq!(
            table.convert(dec!(100), "USD", "PEN", date(2024, 3, 15)),
            Some(dec!(370.00))
        );
    }

    #[test]
    fn falls_back_to_earlier_rate_only() {
        let table = RateTable::from_pairs([
            (date(2024, 3, 10), dec!(3.70)),
            (date(2024, 3, 20), dec!(3.90)),
        ]);
        // The 15th has no rate of its own; the 10th applies, never the 20th.
        assert_eq!(
            table.usd_pen_on_or_before(date(2024, 3, 15)),
            Some(dec!(3.70))
        );
    }

    #[test]
    fn lookup_is_idempotent_against_later_inserts() {
        let mut table = RateTable::from_pairs([(date(2024, 3, 10), dec!(3.70))]);
        let before = table.convert(dec!(100), "PEN", "USD", date(2024, 3, 12));

        // New observations strictly after the lookup date arrive later.
        table.insert(date(2024, 3, 13), dec!(3.95));
        table.insert(date(2024, 4, 1), dec!(4.05));

        let after = table.convert(dec!(100), "PEN", "USD", date(2024, 3, 12));
        assert_eq!(before, after);
    }

    #[test]
    fn missing_rate_converts_to_none() {
        let table = RateTable::from_pairs([(date(2024, 3, 10), dec!(3.70))]);
        assert_eq!(table.convert(dec!(100), "USD", "PEN", date(2024, 3, 9)), None);
    }

    #[test]
    fn same_currency_is_identity_even_without_rates() {
        let table = RateTable::new();
        assert_eq!(
            table.convert(dec!(42), "USD", "USD", date(2024, 1, 1)),
            Some(dec!(42))
        );
    }

    #[test]
    fn pen_to_usd_divides() {
        let table = RateTable::from_pairs([(date(2024, 3, 15), dec!(4.00))]);
        assert_eq!(
            table.convert(dec!(400), "PEN", "USD", date(2024, 3, 15)),
            Some(dec!(100))
        );
    }
}
