//! FX module - USD/PEN rates and currency normalization.

mod fx_errors;
mod fx_model;
mod fx_service;
mod fx_traits;
mod rate_table;

pub use fx_errors::FxError;
pub use fx_model::{FxRate, NewFxRate};
pub use fx_service::FxService;
pub use fx_traits::{FxRepositoryTrait, FxServiceTrait};
pub use rate_table::RateTable;
