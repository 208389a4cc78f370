use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    entities::product,
    errors::ServiceError,
    queries,
    services::products::{CreateProductRequest, UpdateProductRequest},
    ApiResponse, AppState, ListQuery, PaginatedResponse,
};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AdjustStockRequest {
    /// Units to add (positive) or remove (negative).
    pub delta: i32,
}

pub async fn list_products(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ListQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<product::Model>>>, ServiceError> {
    let (items, total) = queries::products::list_filtered(
        &state.db,
        params.q.as_deref(),
        params.page(),
        params.limit(),
    )
    .await?;

    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items,
        total,
        params.page(),
        params.limit(),
    ))))
}

pub async fn get_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<product::Model>>, ServiceError> {
    let found = state.services.products.get(id).await?;
    Ok(Json(ApiResponse::success(found)))
}

pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<product::Model>>), ServiceError> {
    user.require_admin()?;
    let created = state.services.products.create(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<ApiResponse<product::Model>>, ServiceError> {
    user.require_admin()?;
    let updated = state.services.products.update(id, request).await?;
    Ok(Json(ApiResponse::success(updated)))
}

pub async fn adjust_stock(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<AdjustStockRequest>,
) -> Result<Json<ApiResponse<product::Model>>, ServiceError> {
    user.require_admin()?;
    let updated = state
        .services
        .products
        .adjust_stock(id, request.delta)
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    user.require_admin()?;
    state.services.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
