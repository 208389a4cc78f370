use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    entities::customer::{self, Entity as CustomerEntity},
    entities::order::{self, OrderStatus},
    errors::ServiceError,
};

/// Customer identity plus their lifetime order aggregates, as shown on the
/// customers table.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerWithTotals {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_orders: i64,
    pub total_pending: Decimal,
    pub total_paid: Decimal,
}

/// One (customer, status) bucket out of the grouped orders query.
#[derive(Debug, FromQueryResult)]
struct StatusTotalRow {
    customer_id: Uuid,
    status: OrderStatus,
    order_count: i64,
    total: Option<Decimal>,
}

/// Filtered, paginated customers with per-customer order totals. The page
/// of customers is fetched first, then a single grouped query over their
/// orders fills in the counts and pending/paid sums.
#[instrument(skip(db))]
pub async fn list_with_totals(
    db: &DatabaseConnection,
    search: Option<&str>,
    page: u64,
    per_page: u64,
) -> Result<(Vec<CustomerWithTotals>, u64), ServiceError> {
    debug!("Listing customers with order totals");
    let mut select = CustomerEntity::find().order_by_asc(customer::Column::Name);

    if let Some(q) = search.filter(|q| !q.trim().is_empty()) {
        let q = q.trim();
        select = select.filter(
            Condition::any()
                .add(customer::Column::Name.contains(q))
                .add(customer::Column::Email.contains(q)),
        );
    }

    let paginator = select.paginate(db, per_page);
    let total = paginator.num_items().await?;
    let customers = paginator.fetch_page(page.saturating_sub(1)).await?;

    let ids: Vec<Uuid> = customers.iter().map(|c| c.id).collect();
    let mut buckets: HashMap<Uuid, (i64, Decimal, Decimal)> = HashMap::new();

    if !ids.is_empty() {
        let rows = order::Entity::find()
            .select_only()
            .column(order::Column::CustomerId)
            .column(order::Column::Status)
            .column_as(
                Expr::col((order::Entity, order::Column::Id)).count(),
                "order_count",
            )
            .column_as(
                Expr::col((order::Entity, order::Column::Amount)).sum(),
                "total",
            )
            .filter(order::Column::CustomerId.is_in(ids))
            .group_by(order::Column::CustomerId)
            .group_by(order::Column::Status)
            .into_model::<StatusTotalRow>()
            .all(db)
            .await?;

        for row in rows {
            let entry = buckets
                .entry(row.customer_id)
                .or_insert((0, Decimal::ZERO, Decimal::ZERO));
            entry.0 += row.order_count;
            let amount = row.total.unwrap_or(Decimal::ZERO);
            match row.status {
                OrderStatus::Pending => entry.1 += amount,
                OrderStatus::Paid => entry.2 += amount,
            }
        }
    }

    let items = customers
        .into_iter()
        .map(|c| {
            let (total_orders, total_pending, total_paid) =
                buckets.get(&c.id).copied().unwrap_or_default();
            CustomerWithTotals {
                id: c.id,
                name: c.name,
                email: c.email,
                image_url: c.image_url,
                total_orders,
                total_pending,
                total_paid,
            }
        })
        .collect();

    Ok((items, total))
}
