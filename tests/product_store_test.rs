//! Product store coverage: creation rules, stock adjustment semantics and
//! status derivation.

mod common;

use common::TestApp;
use rust_decimal_macros::dec;
use uuid::Uuid;

use inventory_ledger_api::{
    entities::product::{ProductCategory, ProductStatus},
    errors::ServiceError,
    services::products::{CreateProductRequest, UpdateProductRequest},
};

#[tokio::test]
async fn create_derives_status_from_stock() {
    let app = TestApp::new().await;

    let in_stock = app
        .services
        .products
        .create(CreateProductRequest {
            name: "Sourdough Loaf".to_string(),
            category: "bakeryAndDesserts".to_string(),
            price: dec!(4.50),
            stock: 12,
            expiry: chrono::NaiveDate::from_ymd_opt(2026, 6, 1),
        })
        .await
        .expect("create accepted");
    assert_eq!(in_stock.status, ProductStatus::InStock);
    assert_eq!(in_stock.category, ProductCategory::BakeryAndDesserts);

    let sold_out = app
        .services
        .products
        .create(CreateProductRequest {
            name: "Seasonal Wreath".to_string(),
            category: "floral".to_string(),
            price: dec!(25.00),
            stock: 0,
            expiry: None,
        })
        .await
        .expect("create accepted");
    assert_eq!(sold_out.status, ProductStatus::OutOfStock);
}

#[tokio::test]
async fn create_rejects_bad_price_stock_and_category() {
    let app = TestApp::new().await;

    let zero_price = app
        .services
        .products
        .create(CreateProductRequest {
            name: "Free Sample".to_string(),
            category: "snacks".to_string(),
            price: dec!(0.00),
            stock: 5,
            expiry: None,
        })
        .await;
    assert!(matches!(zero_price, Err(ServiceError::ValidationError(_))));

    let negative_stock = app
        .services
        .products
        .create(CreateProductRequest {
            name: "Phantom Stock".to_string(),
            category: "snacks".to_string(),
            price: dec!(1.00),
            stock: -3,
            expiry: None,
        })
        .await;
    assert!(matches!(
        negative_stock,
        Err(ServiceError::ValidationError(_))
    ));

    let bad_category = app
        .services
        .products
        .create(CreateProductRequest {
            name: "Mystery Item".to_string(),
            category: "electronics".to_string(),
            price: dec!(1.00),
            stock: 1,
            expiry: None,
        })
        .await;
    assert!(matches!(bad_category, Err(ServiceError::ValidationError(_))));
}

#[tokio::test]
async fn non_perishable_categories_discard_expiry() {
    let app = TestApp::new().await;

    let cleaning = app
        .services
        .products
        .create(CreateProductRequest {
            name: "All-Purpose Cleaner".to_string(),
            category: "cleaning".to_string(),
            price: dec!(6.00),
            stock: 20,
            expiry: chrono::NaiveDate::from_ymd_opt(2027, 1, 1),
        })
        .await
        .unwrap();
    assert_eq!(cleaning.expiry, None);

    let deli = app
        .services
        .products
        .create(CreateProductRequest {
            name: "Smoked Turkey".to_string(),
            category: "deli".to_string(),
            price: dec!(8.00),
            stock: 4,
            expiry: chrono::NaiveDate::from_ymd_opt(2026, 2, 1),
        })
        .await
        .unwrap();
    assert_eq!(deli.expiry, chrono::NaiveDate::from_ymd_opt(2026, 2, 1));
}

#[tokio::test]
async fn adjust_stock_fails_on_underflow_without_clamping() {
    let app = TestApp::new().await;
    let product = app.seed_product("Lentils", dec!(2.20), 4).await;

    let result = app.services.products.adjust_stock(product.id, -5).await;
    assert!(matches!(result, Err(ServiceError::StockUnderflow(_))));

    // Untouched, not clamped to zero.
    assert_eq!(app.stock_of(product.id).await, 4);
}

#[tokio::test]
async fn adjust_stock_moves_status_both_ways() {
    let app = TestApp::new().await;
    let product = app.seed_product("Basil Plant", dec!(3.00), 1).await;

    let drained = app
        .services
        .products
        .adjust_stock(product.id, -1)
        .await
        .unwrap();
    assert_eq!(drained.stock, 0);
    assert_eq!(drained.status, ProductStatus::OutOfStock);

    let restocked = app
        .services
        .products
        .adjust_stock(product.id, 9)
        .await
        .unwrap();
    assert_eq!(restocked.stock, 9);
    assert_eq!(restocked.status, ProductStatus::InStock);
}

#[tokio::test]
async fn adjust_stock_on_missing_product_is_not_found() {
    let app = TestApp::new().await;
    let result = app.services.products.adjust_stock(Uuid::new_v4(), 1).await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn full_edit_rederives_status() {
    let app = TestApp::new().await;
    let product = app.seed_product("Orange Juice", dec!(4.00), 6).await;

    let updated = app
        .services
        .products
        .update(
            product.id,
            UpdateProductRequest {
                name: "Orange Juice 1L".to_string(),
                category: "beverages".to_string(),
                price: dec!(4.25),
                stock: 0,
                expiry: chrono::NaiveDate::from_ymd_opt(2026, 3, 1),
            },
        )
        .await
        .expect("update accepted");

    assert_eq!(updated.name, "Orange Juice 1L");
    assert_eq!(updated.category, ProductCategory::Beverages);
    assert_eq!(updated.price, dec!(4.25));
    assert_eq!(updated.status, ProductStatus::OutOfStock);
}

#[tokio::test]
async fn delete_missing_product_is_not_found() {
    let app = TestApp::new().await;
    let result = app.services.products.delete(Uuid::new_v4()).await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn delete_removes_the_row() {
    let app = TestApp::new().await;
    let product = app.seed_product("Paper Towels", dec!(5.00), 30).await;

    app.services.products.delete(product.id).await.unwrap();

    let result = app.services.products.get(product.id).await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}
