use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Monthly revenue rollup, one row per calendar month (`YYYY-MM`).
/// The row is overwritten wholesale whenever a paid order in that month
/// is written, so it always equals the sum over the orders table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "revenue")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub month: String,
    pub revenue: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
