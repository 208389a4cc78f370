use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::product::{
        self, Entity as ProductEntity, ProductCategory, ProductStatus,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};

/// Request payload for creating a product.
#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Please input a name"))]
    pub name: String,
    /// One of the catalog categories, e.g. `snacks` or `meatAndSeafood`.
    pub category: String,
    pub price: Decimal,
    pub stock: i32,
    pub expiry: Option<NaiveDate>,
}

/// Request payload for a full product edit.
#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Please input a name"))]
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock: i32,
    pub expiry: Option<NaiveDate>,
}

pub(crate) fn parse_category(raw: &str) -> Result<ProductCategory, ServiceError> {
    ProductCategory::try_from_value(&raw.to_string()).map_err(|_| {
        ServiceError::ValidationError(format!("Please select a valid category, got '{}'", raw))
    })
}

/// Owns product rows: catalog fields, stock and the derived status label.
/// Stock changes only happen here, either through a direct admin edit or
/// through the ledger's delta primitive.
#[derive(Clone)]
pub struct ProductStore {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl ProductStore {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, request), fields(name = %request.name, category = %request.category))]
    pub async fn create(
        &self,
        request: CreateProductRequest,
    ) -> Result<product::Model, ServiceError> {
        request.validate()?;
        let category = parse_category(&request.category)?;
        validate_price_and_stock(request.price, request.stock)?;

        let product_id = Uuid::new_v4();
        let model = product::ActiveModel {
            id: Set(product_id),
            name: Set(request.name),
            category: Set(category),
            price: Set(request.price),
            stock: Set(request.stock),
            expiry: Set(expiry_for_category(category, request.expiry)),
            status: Set(ProductStatus::from_stock(request.stock)),
        };

        let created = model.insert(&*self.db).await.map_err(|e| {
            error!(error = %e, product_id = %product_id, "Failed to create product");
            ServiceError::DatabaseError(e)
        })?;

        info!(product_id = %product_id, "Product created");

        if let Err(e) = self.event_sender.send(Event::ProductCreated(product_id)).await {
            warn!(error = %e, product_id = %product_id, "Failed to send product created event");
        }

        Ok(created)
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get(&self, product_id: Uuid) -> Result<product::Model, ServiceError> {
        ProductEntity::find_by_id(product_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))
    }

    /// Full field edit. Status is re-derived from the submitted stock; a
    /// caller-supplied status would be ignored, so the request has none.
    #[instrument(skip(self, request), fields(product_id = %product_id))]
    pub async fn update(
        &self,
        product_id: Uuid,
        request: UpdateProductRequest,
    ) -> Result<product::Model, ServiceError> {
        request.validate()?;
        let category = parse_category(&request.category)?;
        validate_price_and_stock(request.price, request.stock)?;

        let existing = self.get(product_id).await?;

        let mut model: product::ActiveModel = existing.into();
        model.name = Set(request.name);
        model.category = Set(category);
        model.price = Set(request.price);
        model.stock = Set(request.stock);
        model.expiry = Set(expiry_for_category(category, request.expiry));
        model.status = Set(ProductStatus::from_stock(request.stock));

        let updated = model.update(&*self.db).await?;

        info!(product_id = %product_id, "Product updated");

        if let Err(e) = self.event_sender.send(Event::ProductUpdated(product_id)).await {
            warn!(error = %e, product_id = %product_id, "Failed to send product updated event");
        }

        Ok(updated)
    }

    /// Atomically adds `delta` (positive or negative) to the product's
    /// stock. A delta that would drive stock negative fails with
    /// `StockUnderflow` and leaves the row untouched; nothing is clamped.
    #[instrument(skip(self), fields(product_id = %product_id, delta))]
    pub async fn adjust_stock(
        &self,
        product_id: Uuid,
        delta: i32,
    ) -> Result<product::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let product = Self::apply_stock_delta(&txn, product_id, delta).await?;
        txn.commit().await?;

        info!(product_id = %product_id, delta, new_stock = product.stock, "Stock adjusted");

        if let Err(e) = self
            .event_sender
            .send(Event::StockAdjusted {
                product_id,
                delta,
                new_stock: product.stock,
            })
            .await
        {
            warn!(error = %e, product_id = %product_id, "Failed to send stock adjusted event");
        }

        Ok(product)
    }

    /// The stock-movement primitive. Runs a single conditional UPDATE so
    /// that concurrent movements against the same row serialize in the
    /// storage engine: a decrement only applies when the row still holds
    /// enough stock at execution time. Re-derives the status label from the
    /// post-update stock on the same connection.
    pub(crate) async fn apply_stock_delta<C: ConnectionTrait>(
        conn: &C,
        product_id: Uuid,
        delta: i32,
    ) -> Result<product::Model, ServiceError> {
        let mut update = ProductEntity::update_many()
            .col_expr(
                product::Column::Stock,
                Expr::col(product::Column::Stock).add(delta),
            )
            .filter(product::Column::Id.eq(product_id));

        if delta < 0 {
            update = update.filter(product::Column::Stock.gte(-delta));
        }

        let result = update.exec(conn).await?;

        if result.rows_affected == 0 {
            return match ProductEntity::find_by_id(product_id).one(conn).await? {
                None => Err(ServiceError::NotFound(format!(
                    "Product {} not found",
                    product_id
                ))),
                Some(p) => Err(ServiceError::StockUnderflow(format!(
                    "stock {} of product {} cannot absorb delta {}",
                    p.stock, product_id, delta
                ))),
            };
        }

        let product = ProductEntity::find_by_id(product_id)
            .one(conn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))?;

        let status = ProductStatus::from_stock(product.stock);
        if product.status != status {
            let mut model: product::ActiveModel = product.into();
            model.status = Set(status);
            let product = model.update(conn).await?;
            return Ok(product);
        }

        Ok(product)
    }

    /// Deletes the product. Orders referencing it are kept by the schema
    /// (restrict), so deleting a product with live orders surfaces as a
    /// storage failure rather than silently orphaning ledger rows.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn delete(&self, product_id: Uuid) -> Result<(), ServiceError> {
        let result = ProductEntity::delete_by_id(product_id)
            .exec(&*self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Product {} not found",
                product_id
            )));
        }

        info!(product_id = %product_id, "Product deleted");

        if let Err(e) = self.event_sender.send(Event::ProductDeleted(product_id)).await {
            warn!(error = %e, product_id = %product_id, "Failed to send product deleted event");
        }

        Ok(())
    }
}

fn validate_price_and_stock(price: Decimal, stock: i32) -> Result<(), ServiceError> {
    if price <= Decimal::ZERO {
        return Err(ServiceError::ValidationError(
            "Please enter a price greater than $0".to_string(),
        ));
    }
    if stock < 0 {
        return Err(ServiceError::ValidationError(
            "Stock cannot be negative".to_string(),
        ));
    }
    Ok(())
}

fn expiry_for_category(category: ProductCategory, expiry: Option<NaiveDate>) -> Option<NaiveDate> {
    if category.is_perishable() {
        expiry
    } else {
        None
    }
}
