use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::events::EventSender;
use crate::services::{CustomerDirectory, OrderLedger, ProductStore, RevenueAggregator};

pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;

/// Service handles shared by the HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<ProductStore>,
    pub orders: Arc<OrderLedger>,
    pub customers: Arc<CustomerDirectory>,
    pub revenue: Arc<RevenueAggregator>,
}

impl AppServices {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self {
            products: Arc::new(ProductStore::new(db.clone(), event_sender.clone())),
            orders: Arc::new(OrderLedger::new(db.clone(), event_sender.clone())),
            customers: Arc::new(CustomerDirectory::new(db.clone())),
            revenue: Arc::new(RevenueAggregator::new(db)),
        }
    }
}
