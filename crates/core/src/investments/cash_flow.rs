//! Cash-flow extraction for performance calculation.
//!
//! Turns validated investment events into the signed flow series the
//! period aggregator consumes. Dividends are kept in a separate series
//! by the caller; they credit period return, not invested capital.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::investments_model::{CapitalOrigin, Investment};

/// One signed external or internal flow against a position.
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlow {
    pub date: NaiveDate,
    /// Signed money moved: positive into the position, negative out.
    pub amount: Decimal,
    /// Signed units moved.
    pub quantity_delta: Decimal,
    /// False for reinvested proceeds: they move quantity and cost
    /// basis but stay out of contribution totals.
    pub is_new_capital: bool,
}

/// Extracts the chronologically ordered flow series for a set of
/// events. Input order does not matter; output is sorted by date
/// (stable, so same-day events keep their relative order).
pub fn extract_cash_flows(events: &[Investment]) -> Vec<CashFlow> {
    let mut flows: Vec<CashFlow> = events
        .iter()
        .map(|event| CashFlow {
            date: event.event_date,
            amount: event.amount,
            quantity_delta: event.quantity,
            is_new_capital: event.capital_origin != CapitalOrigin::Reinvestment,
        })
        .collect();
    flows.sort_by_key(|flow| flow.date);
    flows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::investments::OperationType;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn event(
        date: (i32, u32, u32),
        amount: Decimal,
        quantity: Decimal,
        origin: CapitalOrigin,
    ) -> Investment {
        Investment {
            id: format!("{}-{}-{}", date.0, date.1, date.2),
            ticker_id: "t1".to_string(),
            event_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            amount,
            quantity,
            platform_id: None,
            exchange_id: None,
            operation: if amount.is_sign_positive() {
                OperationType::Investment
            } else {
                OperationType::Divestment
            },
            capital_origin: origin,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn sorts_flows_by_date() {
        let events = vec![
            event((2024, 3, 1), dec!(500), dec!(5), CapitalOrigin::FreshCash),
            event((2024, 1, 1), dec!(1000), dec!(10), CapitalOrigin::FreshCash),
        ];
        let flows = extract_cash_flows(&events);
        assert_eq!(flows[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(flows[1].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn reinvestment_is_not_new_capital() {
        let events = vec![
            event((2024, 1, 1), dec!(1000), dec!(10), CapitalOrigin::FreshCash),
            event((2024, 2, 1), dec!(300), dec!(3), CapitalOrigin::Reinvestment),
        ];
        let flows = extract_cash_flows(&events);
        assert!(flows[0].is_new_capital);
        assert!(!flows[1].is_new_capital);
        // Quantity still moves for the reinvested lot.
        assert_eq!(flows[1].quantity_delta, dec!(3));
    }

    #[test]
    fn divestment_keeps_negative_signs() {
        let events = vec![event(
            (2024, 5, 10),
            dec!(-400),
            dec!(-4),
            CapitalOrigin::FreshCash,
        )];
        let flows = extract_cash_flows(&events);
        assert_eq!(flows[0].amount, dec!(-400));
        assert_eq!(flows[0].quantity_delta, dec!(-4));
        assert!(flows[0].is_new_capital);
    }
}
