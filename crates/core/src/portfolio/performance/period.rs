//! Calendar period boundaries.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Reporting granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodInterval {
    #[default]
    Monthly,
    Annual,
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("first of month is valid")
}

fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of next month is valid")
}

impl PeriodInterval {
    /// First day of the period containing `date`.
    pub fn start_of(&self, date: NaiveDate) -> NaiveDate {
        match self {
            PeriodInterval::Monthly => first_of_month(date),
            PeriodInterval::Annual => {
                NaiveDate::from_ymd_opt(date.year(), 1, 1).expect("january 1st is valid")
            }
        }
    }

    /// Last day of the period containing `date`.
    pub fn end_of(&self, date: NaiveDate) -> NaiveDate {
        match self {
            PeriodInterval::Monthly => first_of_next_month(date) - Duration::days(1),
            PeriodInterval::Annual => {
                NaiveDate::from_ymd_opt(date.year(), 12, 31).expect("december 31st is valid")
            }
        }
    }

    fn next_start(&self, start: NaiveDate) -> NaiveDate {
        match self {
            PeriodInterval::Monthly => first_of_next_month(start),
            PeriodInterval::Annual => NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
                .expect("january 1st is valid"),
        }
    }
}

/// Full calendar periods covering `[from, to]`, oldest first. The
/// first period starts at the boundary containing `from`; the last one
/// ends at the boundary containing `to`.
pub fn period_boundaries(
    interval: PeriodInterval,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<(NaiveDate, NaiveDate)> {
    if from > to {
        return Vec::new();
    }
    let mut boundaries = Vec::new();
    let mut start = interval.start_of(from);
    while start <= to {
        boundaries.push((start, interval.end_of(start)));
        start = interval.next_start(start);
    }
    boundaries
}
