//! Parsing helpers for the TEXT-stored columns.
//!
//! Decimals, dates and timestamps are stored as text. These parsers
//! are tolerant: a malformed stored value logs an error and falls back
//! instead of failing the whole query, since the row was written by
//! this crate in the first place.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::error;
use rust_decimal::Decimal;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_decimal(value: &str, field: &str) -> Decimal {
    match Decimal::from_str(value) {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to parse {} '{}' as Decimal: {}. Falling back to zero.", field, value, e);
            Decimal::ZERO
        }
    }
}

pub fn parse_date(value: &str, field: &str) -> NaiveDate {
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to parse {} '{}' as date: {}. Falling back to epoch.", field, value, e);
            NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch date is valid")
        }
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Accepts RFC 3339 as written by this crate and the plain
/// `YYYY-MM-DD HH:MM:SS` form SQLite's `datetime('now')` produces.
pub fn parse_timestamp(value: &str, field: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Utc.from_utc_datetime(&naive);
    }
    error!("Failed to parse {} '{}' as timestamp. Falling back to epoch.", field, value);
    Utc.timestamp_opt(0, 0).single().expect("epoch timestamp is valid")
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

pub fn now_string() -> String {
    format_timestamp(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_stored_decimal() {
        assert_eq!(parse_decimal("123.456", "amount"), dec!(123.456));
        assert_eq!(parse_decimal("garbage", "amount"), Decimal::ZERO);
    }

    #[test]
    fn parses_both_timestamp_forms() {
        let rfc = parse_timestamp("2024-03-15T10:30:00+00:00", "created_at");
        assert_eq!(rfc.timestamp(), 1710498600);
        let sqlite = parse_timestamp("2024-03-15 10:30:00", "created_at");
        assert_eq!(sqlite, rfc);
    }
}
