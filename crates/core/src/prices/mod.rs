//! Historical prices module - storage models, lookup series, and the
//! provider-backed refresh flow.

mod prices_model;
mod prices_service;
mod prices_traits;
mod sync;

pub use prices_model::{DataSource, HistoricalPrice, NewPrice, PriceSeries};
pub use prices_service::PriceService;
pub use prices_traits::{PriceRepositoryTrait, PriceServiceTrait};
pub use sync::{PriceSyncService, PriceSyncServiceTrait, TickerRefreshSummary};
