use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Product entity. One row per product; the category lives in a column
/// rather than a table per category.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Product name must be between 1 and 200 characters"
    ))]
    pub name: String,

    pub category: ProductCategory,

    /// Unit price. Fixed-point; never a float.
    pub price: Decimal,

    /// Units available for order.
    pub stock: i32,

    /// Only perishable categories carry an expiry date.
    pub expiry: Option<Date>,

    /// Derived from stock on every mutation; never set independently.
    pub status: ProductStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Product catalog categories. String values are stored verbatim in the
/// `category` column and accepted verbatim from clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "camelCase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum ProductCategory {
    #[sea_orm(string_value = "snacks")]
    Snacks,
    #[sea_orm(string_value = "pantry")]
    Pantry,
    #[sea_orm(string_value = "candy")]
    Candy,
    #[sea_orm(string_value = "beverages")]
    Beverages,
    #[sea_orm(string_value = "meatAndSeafood")]
    MeatAndSeafood,
    #[sea_orm(string_value = "bakeryAndDesserts")]
    BakeryAndDesserts,
    #[sea_orm(string_value = "breakfast")]
    Breakfast,
    #[sea_orm(string_value = "coffee")]
    Coffee,
    #[sea_orm(string_value = "deli")]
    Deli,
    #[sea_orm(string_value = "organic")]
    Organic,
    #[sea_orm(string_value = "cleaning")]
    Cleaning,
    #[sea_orm(string_value = "floral")]
    Floral,
    #[sea_orm(string_value = "household")]
    Household,
}

impl ProductCategory {
    /// Non-perishable categories never carry an expiry date.
    pub fn is_perishable(&self) -> bool {
        !matches!(self, Self::Cleaning | Self::Floral | Self::Household)
    }
}

/// Derived stock label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "kebab-case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ProductStatus {
    #[sea_orm(string_value = "in-stock")]
    InStock,
    #[sea_orm(string_value = "out-of-stock")]
    OutOfStock,
}

impl ProductStatus {
    pub fn from_stock(stock: i32) -> Self {
        if stock > 0 {
            Self::InStock
        } else {
            Self::OutOfStock
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveEnum;

    #[test]
    fn status_derivation_follows_stock() {
        assert_eq!(ProductStatus::from_stock(1), ProductStatus::InStock);
        assert_eq!(ProductStatus::from_stock(999), ProductStatus::InStock);
        assert_eq!(ProductStatus::from_stock(0), ProductStatus::OutOfStock);
    }

    #[test]
    fn category_strings_round_trip() {
        for (variant, value) in [
            (ProductCategory::Snacks, "snacks"),
            (ProductCategory::MeatAndSeafood, "meatAndSeafood"),
            (ProductCategory::BakeryAndDesserts, "bakeryAndDesserts"),
            (ProductCategory::Household, "household"),
        ] {
            assert_eq!(variant.to_value(), value);
            assert_eq!(
                ProductCategory::try_from_value(&value.to_string()).unwrap(),
                variant
            );
        }
    }

    #[test]
    fn only_grocery_categories_are_perishable() {
        assert!(ProductCategory::Snacks.is_perishable());
        assert!(ProductCategory::Deli.is_perishable());
        assert!(!ProductCategory::Cleaning.is_perishable());
        assert!(!ProductCategory::Floral.is_perishable());
        assert!(!ProductCategory::Household.is_perishable());
    }
}
