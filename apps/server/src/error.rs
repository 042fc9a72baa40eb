//! HTTP error mapping.
//!
//! Core errors become status codes here and nowhere else. Validation
//! problems are the client's fault (4xx); anything unexpected is a 500
//! with the detail kept in the server log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use cartera_core::errors::{CalculatorError, DatabaseError, Error, ValidationError};
use cartera_core::fx::FxError;
use cartera_core::investments::InvestmentError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::Validation(ValidationError::InvalidInput(_))
        | Error::Validation(ValidationError::MissingField(_))
        | Error::Validation(ValidationError::DecimalParse(_))
        | Error::Validation(ValidationError::DateTimeParse(_)) => StatusCode::BAD_REQUEST,

        Error::Investment(InvestmentError::InvalidData(_)) => StatusCode::BAD_REQUEST,
        Error::Investment(InvestmentError::InsufficientQuantity { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }

        Error::Calculation(CalculatorError::InvalidRange(_))
        | Error::Calculation(CalculatorError::UnknownBenchmark(_)) => StatusCode::BAD_REQUEST,

        Error::Fx(FxError::UnsupportedCurrency(_)) | Error::Fx(FxError::InvalidRate(_)) => {
            StatusCode::BAD_REQUEST
        }
        Error::Fx(FxError::RateNotFound(_)) => StatusCode::NOT_FOUND,

        Error::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
        Error::Database(DatabaseError::UniqueViolation(_))
        | Error::Database(DatabaseError::ForeignKeyViolation(_)) => StatusCode::CONFLICT,

        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn validation_maps_to_400() {
        let err = Error::Validation(ValidationError::InvalidInput("bad".to_string()));
        assert_eq!(status_for(&err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn over_divestment_maps_to_422() {
        let err = Error::Investment(InvestmentError::InsufficientQuantity {
            ticker_id: "t1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            available: Decimal::from(5),
            requested: Decimal::from(10),
        });
        assert_eq!(status_for(&err), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn not_found_and_conflict_mappings() {
        assert_eq!(
            status_for(&Error::Database(DatabaseError::NotFound("x".to_string()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&Error::Database(DatabaseError::UniqueViolation("x".to_string()))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&Error::Database(DatabaseError::ForeignKeyViolation(
                "x".to_string()
            ))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn unexpected_maps_to_500() {
        assert_eq!(
            status_for(&Error::Unexpected("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
