use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::{error::ApiResult, main_lib::AppState};
use cartera_core::fx::{FxRate, NewFxRate};

async fn get_rates(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<FxRate>>> {
    let rates = state.fx_service.get_rates()?;
    Ok(Json(rates))
}

async fn upsert_rate(
    State(state): State<Arc<AppState>>,
    Json(rate): Json<NewFxRate>,
) -> ApiResult<Json<FxRate>> {
    let stored = state.fx_service.upsert_rate(rate).await?;
    Ok(Json(stored))
}

async fn delete_rate(
    Path(date): Path<NaiveDate>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.fx_service.delete_rate(date).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Pulls missing USD/PEN rates from SBS. A provider outage yields
/// `{"stored": 0}`, not an error.
async fn refresh_rates(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let stored = state.fx_service.refresh_rates().await?;
    Ok(Json(json!({ "stored": stored })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/fx-rates", get(get_rates).post(upsert_rate))
        .route("/fx-rates/refresh", post(refresh_rates))
        .route("/fx-rates/{date}", axum::routing::delete(delete_rate))
}
