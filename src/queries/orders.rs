use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    entities::customer,
    entities::order::{self, Entity as OrderEntity, OrderStatus},
    entities::product,
    errors::ServiceError,
};

/// Order row joined with the customer and product it references, shaped
/// for the orders table and the dashboard's latest-orders card.
#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct OrderRow {
    pub id: Uuid,
    pub quantity: i32,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_image_url: String,
    pub product_name: String,
}

fn joined_select(search: Option<&str>) -> Select<OrderEntity> {
    let mut select = OrderEntity::find()
        .join(JoinType::InnerJoin, order::Relation::Customer.def())
        .join(JoinType::InnerJoin, order::Relation::Product.def())
        .select_only()
        .column(order::Column::Id)
        .column(order::Column::Quantity)
        .column(order::Column::Amount)
        .column(order::Column::Date)
        .column(order::Column::Status)
        .column_as(customer::Column::Name, "customer_name")
        .column_as(customer::Column::Email, "customer_email")
        .column_as(customer::Column::ImageUrl, "customer_image_url")
        .column_as(product::Column::Name, "product_name")
        .order_by_desc(order::Column::Date);

    if let Some(q) = search.filter(|q| !q.trim().is_empty()) {
        let q = q.trim();
        select = select.filter(
            Condition::any()
                .add(customer::Column::Name.contains(q))
                .add(customer::Column::Email.contains(q))
                .add(product::Column::Name.contains(q))
                .add(order::Column::Status.contains(q)),
        );
    }

    select
}

/// Filtered, paginated orders; newest first. Returns the page rows and the
/// total number of matching orders.
#[instrument(skip(db))]
pub async fn list_filtered(
    db: &DatabaseConnection,
    search: Option<&str>,
    page: u64,
    per_page: u64,
) -> Result<(Vec<OrderRow>, u64), ServiceError> {
    debug!("Listing filtered orders");
    let paginator = joined_select(search)
        .into_model::<OrderRow>()
        .paginate(db, per_page);

    let total = paginator.num_items().await?;
    let rows = paginator.fetch_page(page.saturating_sub(1)).await?;

    Ok((rows, total))
}

/// The five most recent orders, for the dashboard.
#[instrument(skip(db))]
pub async fn latest(db: &DatabaseConnection) -> Result<Vec<OrderRow>, ServiceError> {
    let rows = joined_select(None)
        .limit(5)
        .into_model::<OrderRow>()
        .all(db)
        .await?;
    Ok(rows)
}
