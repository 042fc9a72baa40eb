use thiserror::Error;

#[derive(Error, Debug)]
pub enum FxError {
    #[error("No FX rate available on or before the requested date: {0}")]
    RateNotFound(String),

    #[error("Invalid FX rate: {0}")]
    InvalidRate(String),

    #[error("Currency '{0}' is not supported")]
    UnsupportedCurrency(String),
}
