use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;

use crate::{error::ApiResult, main_lib::AppState};
use cartera_core::prices::{HistoricalPrice, NewPrice, TickerRefreshSummary};

async fn get_prices(
    Path(ticker_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<HistoricalPrice>>> {
    let prices = state.price_service.get_prices_for_ticker(&ticker_id)?;
    Ok(Json(prices))
}

async fn upsert_price(
    State(state): State<Arc<AppState>>,
    Json(price): Json<NewPrice>,
) -> ApiResult<Json<HistoricalPrice>> {
    let stored = state.price_service.upsert_price(price).await?;
    Ok(Json(stored))
}

async fn delete_price(
    Path((ticker_id, date)): Path<(String, NaiveDate)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.price_service.delete_price(&ticker_id, date).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Walks the provider chain for one ticker. Provider failures come
/// back inside the summary's attempt list, not as an error status.
async fn refresh_ticker(
    Path(ticker_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TickerRefreshSummary>> {
    let summary = state.price_sync_service.refresh_ticker(&ticker_id).await?;
    Ok(Json(summary))
}

/// Sequentially refreshes every active ticker.
async fn refresh_all(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<TickerRefreshSummary>>> {
    let summaries = state.price_sync_service.refresh_all().await?;
    Ok(Json(summaries))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/prices", post(upsert_price))
        .route("/prices/refresh", post(refresh_all))
        .route("/prices/refresh/{ticker_id}", post(refresh_ticker))
        .route("/prices/{ticker_id}", get(get_prices))
        .route("/prices/{ticker_id}/{date}", axum::routing::delete(delete_price))
}
