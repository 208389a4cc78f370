use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    entities::customer::{self, Entity as CustomerEntity},
    errors::ServiceError,
};

/// Read-only lookup over customer reference data. Customer management
/// itself happens in another system; the ledger only needs existence
/// checks and identity fields.
#[derive(Clone)]
pub struct CustomerDirectory {
    db: Arc<DatabaseConnection>,
}

impl CustomerDirectory {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self), fields(customer_id = %customer_id))]
    pub async fn get(&self, customer_id: Uuid) -> Result<customer::Model, ServiceError> {
        CustomerEntity::find_by_id(customer_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Customer {} not found", customer_id))
            })
    }

    #[instrument(skip(self), fields(customer_id = %customer_id))]
    pub async fn exists(&self, customer_id: Uuid) -> Result<bool, ServiceError> {
        Self::exists_in(&*self.db, customer_id).await
    }

    /// Existence check on an arbitrary connection, so the ledger can run it
    /// inside its own transaction.
    pub(crate) async fn exists_in<C: ConnectionTrait>(
        conn: &C,
        customer_id: Uuid,
    ) -> Result<bool, ServiceError> {
        let found = CustomerEntity::find_by_id(customer_id).one(conn).await?;
        Ok(found.is_some())
    }

    /// All customers, name-ascending. Feeds the order form dropdown.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<customer::Model>, ServiceError> {
        let customers = CustomerEntity::find()
            .order_by_asc(customer::Column::Name)
            .all(&*self.db)
            .await?;
        Ok(customers)
    }
}
