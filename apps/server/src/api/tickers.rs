use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::{error::ApiResult, main_lib::AppState};
use cartera_core::tickers::{NewTicker, Ticker, TickerUpdate};

async fn get_tickers(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Ticker>>> {
    let tickers = state.ticker_service.get_tickers()?;
    Ok(Json(tickers))
}

async fn get_ticker(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Ticker>> {
    let ticker = state.ticker_service.get_ticker(&id)?;
    Ok(Json(ticker))
}

async fn create_ticker(
    State(state): State<Arc<AppState>>,
    Json(new_ticker): Json<NewTicker>,
) -> ApiResult<Json<Ticker>> {
    let ticker = state.ticker_service.create_ticker(new_ticker).await?;
    Ok(Json(ticker))
}

async fn update_ticker(
    State(state): State<Arc<AppState>>,
    Json(update): Json<TickerUpdate>,
) -> ApiResult<Json<Ticker>> {
    let ticker = state.ticker_service.update_ticker(update).await?;
    Ok(Json(ticker))
}

async fn delete_ticker(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.ticker_service.delete_ticker(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/tickers",
            get(get_tickers).post(create_ticker).put(update_ticker),
        )
        .route("/tickers/{id}", get(get_ticker).delete(delete_ticker))
}
