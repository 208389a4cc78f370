use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::order::{self, Entity as OrderEntity, OrderStatus},
    entities::product,
    errors::ServiceError,
    events::{Event, EventSender},
    services::customers::CustomerDirectory,
    services::products::ProductStore,
    services::revenue::RevenueAggregator,
};

/// Request payload for placing an order. The amount is derived; callers
/// cannot supply one.
#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct PlaceOrderRequest {
    pub customer_id: Uuid,
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    pub status: OrderStatus,
}

/// Request payload for rewriting an order. All fields are submitted, as on
/// the edit form; quantity and amount are re-derived from scratch.
#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateOrderRequest {
    pub customer_id: Uuid,
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    pub status: OrderStatus,
}

/// Validates and records orders. Every operation runs as one transaction
/// covering the order row, the product's stock and the revenue rollup, so
/// either all of them move or none do.
#[derive(Clone)]
pub struct OrderLedger {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl OrderLedger {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, request), fields(customer_id = %request.customer_id, product_id = %request.product_id, quantity = request.quantity))]
    pub async fn place_order(
        &self,
        request: PlaceOrderRequest,
    ) -> Result<order::Model, ServiceError> {
        request.validate()?;

        let txn = self.db.begin().await?;

        if !CustomerDirectory::exists_in(&txn, request.customer_id).await? {
            return Err(ServiceError::InvalidReference(format!(
                "Customer {} does not exist",
                request.customer_id
            )));
        }

        let product = load_product(&txn, request.product_id).await?;

        if request.quantity > product.stock {
            return Err(ServiceError::InsufficientStock(format!(
                "requested {} of product {}, only {} available",
                request.quantity, product.id, product.stock
            )));
        }

        let amount = product.price * Decimal::from(request.quantity);
        let order_id = Uuid::new_v4();

        let placed = order::ActiveModel {
            id: Set(order_id),
            customer_id: Set(request.customer_id),
            product_id: Set(request.product_id),
            quantity: Set(request.quantity),
            amount: Set(amount),
            date: Set(Utc::now().date_naive()),
            status: Set(request.status),
        }
        .insert(&txn)
        .await?;

        // The conditional decrement is the authoritative check: a
        // concurrent placement that drained the row since the read above
        // fails here, and the whole transaction unwinds.
        take_stock(&txn, request.product_id, request.quantity).await?;

        if placed.status == OrderStatus::Paid {
            RevenueAggregator::recompute_month_in(&txn, placed.date).await?;
        }

        txn.commit().await?;

        info!(order_id = %order_id, amount = %placed.amount, "Order placed");

        if let Err(e) = self.event_sender.send(Event::OrderPlaced(order_id)).await {
            warn!(error = %e, order_id = %order_id, "Failed to send order placed event");
        }

        Ok(placed)
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_order(&self, order_id: Uuid) -> Result<Option<order::Model>, ServiceError> {
        let found = OrderEntity::find_by_id(order_id).one(&*self.db).await?;
        Ok(found)
    }

    /// Rewrites an order. The old quantity is returned to the old order's
    /// product first, then the new quantity is validated and taken from the
    /// new product; when both point at the same row the revert and the take
    /// net out. Failure anywhere unwinds the revert too.
    #[instrument(skip(self, request), fields(order_id = %order_id))]
    pub async fn update_order(
        &self,
        order_id: Uuid,
        request: UpdateOrderRequest,
    ) -> Result<order::Model, ServiceError> {
        request.validate()?;

        let txn = self.db.begin().await?;

        let existing = OrderEntity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        if !CustomerDirectory::exists_in(&txn, request.customer_id).await? {
            return Err(ServiceError::InvalidReference(format!(
                "Customer {} does not exist",
                request.customer_id
            )));
        }

        ProductStore::apply_stock_delta(&txn, existing.product_id, existing.quantity).await?;

        // Loaded after the revert, so a same-product edit validates against
        // the restored stock level.
        let product = load_product(&txn, request.product_id).await?;

        if request.quantity > product.stock {
            return Err(ServiceError::InsufficientStock(format!(
                "requested {} of product {}, only {} available",
                request.quantity, product.id, product.stock
            )));
        }

        let amount = product.price * Decimal::from(request.quantity);

        take_stock(&txn, request.product_id, request.quantity).await?;

        let old_status = existing.status;
        let mut model: order::ActiveModel = existing.into();
        model.customer_id = Set(request.customer_id);
        model.product_id = Set(request.product_id);
        model.quantity = Set(request.quantity);
        model.amount = Set(amount);
        model.status = Set(request.status);
        let updated = model.update(&txn).await?;

        // A paid order that is edited must keep the rollup in line whether
        // it stays paid, becomes paid, or stops being paid.
        if old_status == OrderStatus::Paid || updated.status == OrderStatus::Paid {
            RevenueAggregator::recompute_month_in(&txn, updated.date).await?;
        }

        txn.commit().await?;

        info!(order_id = %order_id, amount = %updated.amount, "Order updated");

        if let Err(e) = self.event_sender.send(Event::OrderUpdated(order_id)).await {
            warn!(error = %e, order_id = %order_id, "Failed to send order updated event");
        }

        Ok(updated)
    }

    /// Removes an order and returns its quantity to the product. The
    /// revenue rollup is deliberately left alone: deleting a paid order has
    /// never adjusted revenue here, and callers that care are told via the
    /// warning below.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn delete_order(&self, order_id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;

        let existing = OrderEntity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        ProductStore::apply_stock_delta(&txn, existing.product_id, existing.quantity).await?;

        OrderEntity::delete_by_id(order_id).exec(&txn).await?;

        txn.commit().await?;

        if existing.status == OrderStatus::Paid {
            warn!(
                order_id = %order_id,
                month = %crate::services::revenue::month_key(existing.date),
                "deleted a paid order; the month rollup still includes its amount"
            );
        }

        info!(order_id = %order_id, "Order deleted");

        if let Err(e) = self.event_sender.send(Event::OrderDeleted(order_id)).await {
            warn!(error = %e, order_id = %order_id, "Failed to send order deleted event");
        }

        Ok(())
    }
}

async fn load_product<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
) -> Result<product::Model, ServiceError> {
    product::Entity::find_by_id(product_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::InvalidReference(format!("Product {} does not exist", product_id))
        })
}

/// Decrements stock for an accepted order, translating an underflow into
/// the ledger's failure vocabulary.
async fn take_stock<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    quantity: i32,
) -> Result<(), ServiceError> {
    ProductStore::apply_stock_delta(conn, product_id, -quantity)
        .await
        .map_err(|err| match err {
            ServiceError::StockUnderflow(_) => ServiceError::InsufficientStock(format!(
                "requested {} of product {} exceeds available stock",
                quantity, product_id
            )),
            other => other,
        })?;
    Ok(())
}
