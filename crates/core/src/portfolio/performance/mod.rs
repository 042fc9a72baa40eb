//! Performance module - calendar-period return aggregation.
//!
//! One pure aggregation routine serves every report view (portfolio,
//! ticker, platform, exchange, instrument type); the service only
//! decides which events feed it.

mod aggregator;
mod benchmark;
mod performance_model;
mod performance_service;
mod period;

pub use aggregator::{aggregate_periods, DividendFlow, TickerSeries};
pub use benchmark::{benchmark_cumulative_returns, merge_benchmark};
pub use performance_model::{
    BenchmarkedPeriod, PerformanceReport, PeriodPerformance, ReportScope,
};
pub use performance_service::{PerformanceService, PerformanceServiceTrait};
pub use period::{period_boundaries, PeriodInterval};
