use axum::{extract::State, response::Json};

use crate::{
    auth::AuthUser,
    entities::revenue,
    errors::ServiceError,
    queries::{self, dashboard::CardData},
    ApiResponse, AppState,
};

pub async fn cards(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<ApiResponse<CardData>>, ServiceError> {
    let data = queries::dashboard::card_data(&state.db).await?;
    Ok(Json(ApiResponse::success(data)))
}

pub async fn revenue_series(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<ApiResponse<Vec<revenue::Model>>>, ServiceError> {
    let series = state.services.revenue.series().await?;
    Ok(Json(ApiResponse::success(series)))
}

pub async fn latest_orders(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<ApiResponse<Vec<queries::orders::OrderRow>>>, ServiceError> {
    let rows = queries::orders::latest(&state.db).await?;
    Ok(Json(ApiResponse::success(rows)))
}
