use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};

use crate::{error::ApiResult, main_lib::AppState};
use cartera_core::platforms::{NewPlatform, Platform};

async fn get_platforms(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Platform>>> {
    let platforms = state.platform_service.get_platforms()?;
    Ok(Json(platforms))
}

async fn create_platform(
    State(state): State<Arc<AppState>>,
    Json(new_platform): Json<NewPlatform>,
) -> ApiResult<Json<Platform>> {
    let platform = state.platform_service.create_platform(new_platform).await?;
    Ok(Json(platform))
}

async fn update_platform(
    State(state): State<Arc<AppState>>,
    Json(platform): Json<Platform>,
) -> ApiResult<Json<Platform>> {
    let platform = state.platform_service.update_platform(platform).await?;
    Ok(Json(platform))
}

async fn delete_platform(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.platform_service.delete_platform(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/platforms",
            get(get_platforms).post(create_platform).put(update_platform),
        )
        .route("/platforms/{id}", delete(delete_platform))
}
