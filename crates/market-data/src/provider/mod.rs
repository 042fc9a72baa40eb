//! Provider implementations and the traits they share.

mod alpha_vantage;
mod bvl;
mod polygon;
mod sbs;
mod traits;
mod yahoo;

pub use alpha_vantage::AlphaVantageProvider;
pub use bvl::BvlProvider;
pub use polygon::PolygonProvider;
pub use sbs::SbsProvider;
pub use traits::{FxRateProvider, PriceProvider};
pub use yahoo::YahooProvider;
