//! Dividends module.

mod dividends_model;
mod dividends_service;
mod dividends_traits;

pub use dividends_model::{Dividend, DividendUpdate, NewDividend};
pub use dividends_service::DividendService;
pub use dividends_traits::{DividendRepositoryTrait, DividendServiceTrait};
