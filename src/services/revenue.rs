use std::sync::Arc;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::{info, instrument};

use crate::{
    entities::order::{self, Entity as OrderEntity, OrderStatus},
    entities::revenue::{self, Entity as RevenueEntity},
    errors::ServiceError,
};

/// Maintains the monthly revenue rollup. The rollup is always a full
/// recomputation over the orders table, so repeated calls converge on the
/// same stored total no matter how they interleave.
#[derive(Clone)]
pub struct RevenueAggregator {
    db: Arc<DatabaseConnection>,
}

/// Rollup key for a calendar month, e.g. `2024-03`. Year-qualified so
/// totals never collide across years.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

fn month_bounds(date: NaiveDate) -> Result<(NaiveDate, NaiveDate), ServiceError> {
    let start = date
        .with_day(1)
        .ok_or_else(|| ServiceError::InternalError(format!("invalid date {}", date)))?;
    let end = start
        .checked_add_months(Months::new(1))
        .ok_or_else(|| ServiceError::InternalError(format!("month overflow at {}", date)))?;
    Ok((start, end))
}

impl RevenueAggregator {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Recomputes the rollup for `date`'s month in its own transaction.
    #[instrument(skip(self))]
    pub async fn recompute_month(&self, date: NaiveDate) -> Result<Decimal, ServiceError> {
        let txn = self.db.begin().await?;
        let total = Self::recompute_month_in(&txn, date).await?;
        txn.commit().await?;
        Ok(total)
    }

    /// Recomputes the rollup on the caller's connection. The ledger calls
    /// this inside the same transaction as the order write so the rollup
    /// commits or rolls back with it.
    pub(crate) async fn recompute_month_in<C: ConnectionTrait>(
        conn: &C,
        date: NaiveDate,
    ) -> Result<Decimal, ServiceError> {
        let (start, end) = month_bounds(date)?;

        let total: Decimal = OrderEntity::find()
            .filter(order::Column::Status.eq(OrderStatus::Paid))
            .filter(order::Column::Date.gte(start))
            .filter(order::Column::Date.lt(end))
            .all(conn)
            .await?
            .iter()
            .map(|o| o.amount)
            .sum();

        let month = month_key(date);
        let row = revenue::ActiveModel {
            month: Set(month.clone()),
            revenue: Set(total),
        };

        RevenueEntity::insert(row)
            .on_conflict(
                OnConflict::column(revenue::Column::Month)
                    .update_column(revenue::Column::Revenue)
                    .to_owned(),
            )
            .exec(conn)
            .await?;

        info!(%month, %total, "revenue rollup updated");
        Ok(total)
    }

    /// All rollup rows, month-ascending.
    pub async fn series(&self) -> Result<Vec<revenue::Model>, ServiceError> {
        use sea_orm::QueryOrder;

        let rows = RevenueEntity::find()
            .order_by_asc(revenue::Column::Month)
            .all(&*self.db)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_key_is_year_qualified() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        assert_eq!(month_key(date), "2024-03");

        let december = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(month_key(december), "2023-12");
    }

    #[test]
    fn month_bounds_cover_the_whole_month() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let (start, end) = month_bounds(date).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn month_bounds_roll_over_year_end() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 8).unwrap();
        let (start, end) = month_bounds(date).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }
}
