use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use tracing::{debug, instrument};

use crate::{
    entities::product::{self, Entity as ProductEntity},
    errors::ServiceError,
};

/// Filtered, paginated products, name-descending. The filter matches the
/// substring against name, category and status the way the products table
/// search box does.
#[instrument(skip(db))]
pub async fn list_filtered(
    db: &DatabaseConnection,
    search: Option<&str>,
    page: u64,
    per_page: u64,
) -> Result<(Vec<product::Model>, u64), ServiceError> {
    debug!("Listing filtered products");
    let mut select = ProductEntity::find().order_by_desc(product::Column::Name);

    if let Some(q) = search.filter(|q| !q.trim().is_empty()) {
        let q = q.trim();
        select = select.filter(
            Condition::any()
                .add(product::Column::Name.contains(q))
                .add(product::Column::Category.contains(q))
                .add(product::Column::Status.contains(q)),
        );
    }

    let paginator = select.paginate(db, per_page);
    let total = paginator.num_items().await?;
    let rows = paginator.fetch_page(page.saturating_sub(1)).await?;

    Ok((rows, total))
}
