//! Error types for market data operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Provider {provider} request failed: {message}")]
    ProviderError { provider: String, message: String },

    #[error("Provider {provider} returned an unparseable response: {message}")]
    ParseError { provider: String, message: String },

    #[error("No data available for symbol {0}")]
    NoData(String),

    #[error("Provider {provider} rate limit reached")]
    RateLimited { provider: String },

    #[error("Operation {operation} not supported by provider {provider}")]
    NotSupported { operation: String, provider: String },

    #[error("Provider {provider} is not configured: {message}")]
    NotConfigured { provider: String, message: String },
}

impl MarketDataError {
    /// Wraps a reqwest failure as a provider error.
    pub fn from_request(provider: &str, err: reqwest::Error) -> Self {
        if err.status().map(|s| s.as_u16()) == Some(429) {
            MarketDataError::RateLimited {
                provider: provider.to_string(),
            }
        } else {
            MarketDataError::ProviderError {
                provider: provider.to_string(),
                message: err.to_string(),
            }
        }
    }
}
