//! Exchanges module - the market a ticker is listed on.

mod exchanges_model;
mod exchanges_service;
mod exchanges_traits;

pub use exchanges_model::{Exchange, NewExchange};
pub use exchanges_service::ExchangeService;
pub use exchanges_traits::{ExchangeRepositoryTrait, ExchangeServiceTrait};
