use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    entities::order,
    errors::ServiceError,
    queries,
    services::orders::{PlaceOrderRequest, UpdateOrderRequest},
    ApiResponse, AppState, ListQuery, PaginatedResponse,
};

#[utoipa::path(
    get,
    path = "/api/v1/orders",
    summary = "List orders",
    description = "Paginated orders joined with customer and product identity; filter matches customer name/email, product name and status",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 6)"),
        ("q" = Option<String>, Query, description = "Search term"),
    ),
    responses(
        (status = 200, description = "Orders retrieved successfully"),
        (status = 401, description = "Unauthorized"),
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ListQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<queries::orders::OrderRow>>>, ServiceError> {
    let (items, total) = queries::orders::list_filtered(
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

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    summary = "Get an order",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order retrieved successfully"),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<order::Model>>, ServiceError> {
    let found = state
        .services
        .orders
        .get_order(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", id)))?;

    Ok(Json(ApiResponse::success(found)))
}

#[utoipa::path(
    post,
    path = "/api/v1/orders",
    summary = "Place an order",
    description = "Validates stock, derives the amount from the product's price, decrements stock and updates the revenue rollup in one transaction",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed"),
        (status = 400, description = "Invalid input or unknown customer/product"),
        (status = 403, description = "Admin role required"),
        (status = 422, description = "Requested quantity exceeds available stock"),
    ),
    tag = "Orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<order::Model>>), ServiceError> {
    user.require_admin()?;
    let placed = state.services.orders.place_order(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(placed))))
}

#[utoipa::path(
    put,
    path = "/api/v1/orders/{id}",
    summary = "Rewrite an order",
    description = "Reverts the old quantity, re-validates against current stock, recomputes the amount and keeps the revenue rollup in line",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Order not found"),
        (status = 422, description = "Requested quantity exceeds available stock"),
    ),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<Json<ApiResponse<order::Model>>, ServiceError> {
    user.require_admin()?;
    let updated = state.services.orders.update_order(id, request).await?;
    Ok(Json(ApiResponse::success(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/orders/{id}",
    summary = "Delete an order",
    description = "Returns the order's quantity to the product's stock and removes the row",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    user.require_admin()?;
    state.services.orders.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
