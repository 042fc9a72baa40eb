use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use cartera_core::dividends::{Dividend, DividendUpdate, NewDividend};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    ticker_id: Option<String>,
}

async fn get_dividends(
    Query(query): Query<ListQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Dividend>>> {
    let dividends = match query.ticker_id {
        Some(ticker_id) => state.dividend_service.get_dividends_by_ticker(&ticker_id)?,
        None => state.dividend_service.get_dividends()?,
    };
    Ok(Json(dividends))
}

async fn create_dividend(
    State(state): State<Arc<AppState>>,
    Json(new_dividend): Json<NewDividend>,
) -> ApiResult<Json<Dividend>> {
    let dividend = state.dividend_service.create_dividend(new_dividend).await?;
    Ok(Json(dividend))
}

async fn update_dividend(
    State(state): State<Arc<AppState>>,
    Json(update): Json<DividendUpdate>,
) -> ApiResult<Json<Dividend>> {
    let dividend = state.dividend_service.update_dividend(update).await?;
    Ok(Json(dividend))
}

async fn delete_dividend(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.dividend_service.delete_dividend(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/dividends",
            get(get_dividends).post(create_dividend).put(update_dividend),
        )
        .route("/dividends/{id}", delete(delete_dividend))
}
