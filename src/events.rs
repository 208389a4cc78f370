use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

/// Domain events emitted after a ledger transaction commits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    OrderPlaced(Uuid),
    OrderUpdated(Uuid),
    OrderDeleted(Uuid),
    ProductCreated(Uuid),
    ProductUpdated(Uuid),
    ProductDeleted(Uuid),
    StockAdjusted {
        product_id: Uuid,
        delta: i32,
        new_stock: i32,
    },
    RevenueRecomputed {
        month: String,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event. Events are advisory; the ledger state is already
    /// committed by the time this is called.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Drains the event channel, logging each event. Runs until every sender
/// has been dropped.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        match &event {
            Event::OrderPlaced(id) => info!(order_id = %id, "order placed"),
            Event::OrderUpdated(id) => info!(order_id = %id, "order updated"),
            Event::OrderDeleted(id) => info!(order_id = %id, "order deleted"),
            Event::ProductCreated(id) => info!(product_id = %id, "product created"),
            Event::ProductUpdated(id) => info!(product_id = %id, "product updated"),
            Event::ProductDeleted(id) => info!(product_id = %id, "product deleted"),
            Event::StockAdjusted {
                product_id,
                delta,
                new_stock,
            } => info!(product_id = %product_id, delta, new_stock, "stock adjusted"),
            Event::RevenueRecomputed { month } => info!(%month, "revenue recomputed"),
        }
    }
}
