use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    entities::customer,
    errors::ServiceError,
    queries,
    ApiResponse, AppState, ListQuery, PaginatedResponse,
};

/// Slim customer row for the order form dropdown.
#[derive(Debug, Serialize)]
pub struct CustomerOption {
    pub id: Uuid,
    pub name: String,
}

pub async fn list_customers(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ListQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<queries::customers::CustomerWithTotals>>>, ServiceError>
{
    let (items, total) = queries::customers::list_with_totals(
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

pub async fn list_all_customers(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<ApiResponse<Vec<CustomerOption>>>, ServiceError> {
    let customers = state.services.customers.list_all().await?;
    let options = customers
        .into_iter()
        .map(|c| CustomerOption {
            id: c.id,
            name: c.name,
        })
        .collect();

    Ok(Json(ApiResponse::success(options)))
}

pub async fn get_customer(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<customer::Model>>, ServiceError> {
    let found = state.services.customers.get(id).await?;
    Ok(Json(ApiResponse::success(found)))
}
