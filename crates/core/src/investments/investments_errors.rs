use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvestmentError {
    #[error("Invalid investment data: {0}")]
    InvalidData(String),

    #[error(
        "Divestment of {requested} units of ticker {ticker_id} on {date} exceeds the {available} units held"
    )]
    InsufficientQuantity {
        ticker_id: String,
        date: NaiveDate,
        available: Decimal,
        requested: Decimal,
    },
}
