use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};

use crate::{error::ApiResult, main_lib::AppState};
use cartera_core::exchanges::{Exchange, NewExchange};

async fn get_exchanges(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Exchange>>> {
    let exchanges = state.exchange_service.get_exchanges()?;
    Ok(Json(exchanges))
}

async fn create_exchange(
    State(state): State<Arc<AppState>>,
    Json(new_exchange): Json<NewExchange>,
) -> ApiResult<Json<Exchange>> {
    let exchange = state.exchange_service.create_exchange(new_exchange).await?;
    Ok(Json(exchange))
}

async fn update_exchange(
    State(state): State<Arc<AppState>>,
    Json(exchange): Json<Exchange>,
) -> ApiResult<Json<Exchange>> {
    let exchange = state.exchange_service.update_exchange(exchange).await?;
    Ok(Json(exchange))
}

async fn delete_exchange(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.exchange_service.delete_exchange(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/exchanges",
            get(get_exchanges).post(create_exchange).put(update_exchange),
        )
        .route("/exchanges/{id}", delete(delete_exchange))
}
