//! Market data provider integrations for Cartera.
//!
//! This crate talks to the external price and FX sources (Polygon,
//! Alpha Vantage, Yahoo, BVL, SBS) behind small provider traits, and
//! exposes a priority-ordered chain that records every attempt so the
//! caller can surface which source actually produced the data.

pub mod chain;
pub mod errors;
pub mod models;
pub mod provider;

pub use chain::ProviderChain;
pub use errors::MarketDataError;
pub use models::{FetchReport, PriceRequest, ProviderAttempt, ProviderFxRate, ProviderPrice};
pub use provider::{
    AlphaVantageProvider, BvlProvider, FxRateProvider, PolygonProvider, PriceProvider,
    SbsProvider, YahooProvider,
};
