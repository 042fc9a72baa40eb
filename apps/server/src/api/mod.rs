mod dividends;
mod exchanges;
mod fx;
mod health;
mod investments;
mod performance;
mod platforms;
mod prices;
mod tickers;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(health::router())
        .merge(tickers::router())
        .merge(platforms::router())
        .merge(exchanges::router())
        .merge(investments::router())
        .merge(dividends::router())
        .merge(prices::router())
        .merge(fx::router())
        .merge(performance::router());

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(60)))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
