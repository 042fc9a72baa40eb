use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use cartera_core::investments::{Investment, InvestmentUpdate, NewInvestment};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    ticker_id: Option<String>,
}

async fn get_investments(
    Query(query): Query<ListQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Investment>>> {
    let investments = match query.ticker_id {
        Some(ticker_id) => state
            .investment_service
            .get_investments_by_ticker(&ticker_id)?,
        None => state.investment_service.get_investments()?,
    };
    Ok(Json(investments))
}

async fn get_investment(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Investment>> {
    let investment = state.investment_service.get_investment(&id)?;
    Ok(Json(investment))
}

async fn create_investment(
    State(state): State<Arc<AppState>>,
    Json(new_investment): Json<NewInvestment>,
) -> ApiResult<Json<Investment>> {
    let investment = state
        .investment_service
        .create_investment(new_investment)
        .await?;
    Ok(Json(investment))
}

async fn update_investment(
    State(state): State<Arc<AppState>>,
    Json(update): Json<InvestmentUpdate>,
) -> ApiResult<Json<Investment>> {
    let investment = state.investment_service.update_investment(update).await?;
    Ok(Json(investment))
}

async fn delete_investment(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.investment_service.delete_investment(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/investments",
            get(get_investments)
                .post(create_investment)
                .put(update_investment),
        )
        .route(
            "/investments/{id}",
            get(get_investment).delete(delete_investment),
        )
}
