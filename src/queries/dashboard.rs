use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};
use serde::Serialize;
use tracing::instrument;

use crate::{
    entities::customer::Entity as CustomerEntity,
    entities::order::{self, Entity as OrderEntity, OrderStatus},
    errors::ServiceError,
};

/// Aggregate counters for the dashboard cards.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CardData {
    pub order_count: u64,
    pub customer_count: u64,
    pub total_paid: Decimal,
    pub total_pending: Decimal,
}

#[instrument(skip(db))]
pub async fn card_data(db: &DatabaseConnection) -> Result<CardData, ServiceError> {
    let order_count = OrderEntity::find().count(db).await?;
    let customer_count = CustomerEntity::find().count(db).await?;
    let total_paid = status_total(db, OrderStatus::Paid).await?;
    let total_pending = status_total(db, OrderStatus::Pending).await?;

    Ok(CardData {
        order_count,
        customer_count,
        total_paid,
        total_pending,
    })
}

async fn status_total(
    db: &DatabaseConnection,
    status: OrderStatus,
) -> Result<Decimal, ServiceError> {
    let total = OrderEntity::find()
        .select_only()
        .column_as(Expr::col(order::Column::Amount).sum(), "total")
        .filter(order::Column::Status.eq(status))
        .into_tuple::<Option<Decimal>>()
        .one(db)
        .await?;

    Ok(total.flatten().unwrap_or(Decimal::ZERO))
}
