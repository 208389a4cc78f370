//! Read projection coverage: joined order rows, customer aggregates,
//! dashboard cards and pagination.

mod common;

use common::TestApp;
use rust_decimal_macros::dec;

use inventory_ledger_api::{
    entities::order::OrderStatus,
    queries,
    services::orders::PlaceOrderRequest,
};

#[tokio::test]
async fn order_rows_carry_customer_and_product_identity() {
    let app = TestApp::new().await;
    let amy = app.seed_customer("Amy Burns").await;
    let product = app.seed_product("Ground Coffee", dec!(8.00), 30).await;

    app.services
        .orders
        .place_order(PlaceOrderRequest {
            customer_id: amy.id,
            product_id: product.id,
            quantity: 2,
            status: OrderStatus::Paid,
        })
        .await
        .unwrap();

    let (rows, total) = queries::orders::list_filtered(&app.db, None, 1, 6)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.customer_name, "Amy Burns");
    assert_eq!(row.customer_email, "amy.burns@example.com");
    assert_eq!(row.product_name, "Ground Coffee");
    assert_eq!(row.amount, dec!(16.00));
    assert_eq!(row.status, OrderStatus::Paid);
}

#[tokio::test]
async fn order_search_filters_by_customer_name() {
    let app = TestApp::new().await;
    let amy = app.seed_customer("Amy Burns").await;
    let lee = app.seed_customer("Lee Robinson").await;
    let product = app.seed_product("Hot Sauce", dec!(3.00), 50).await;

    for customer in [&amy, &lee] {
        app.services
            .orders
            .place_order(PlaceOrderRequest {
                customer_id: customer.id,
                product_id: product.id,
                quantity: 1,
                status: OrderStatus::Pending,
            })
            .await
            .unwrap();
    }

    let (rows, total) = queries::orders::list_filtered(&app.db, Some("Robinson"), 1, 6)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].customer_name, "Lee Robinson");
}

#[tokio::test]
async fn pagination_respects_page_size() {
    let app = TestApp::new().await;
    let customer = app.seed_customer("Evil Rabbit").await;
    let product = app.seed_product("Bulk Rice", dec!(1.00), 100).await;

    for _ in 0..8 {
        app.services
            .orders
            .place_order(PlaceOrderRequest {
                customer_id: customer.id,
                product_id: product.id,
                quantity: 1,
                status: OrderStatus::Pending,
            })
            .await
            .unwrap();
    }

    let (first_page, total) = queries::orders::list_filtered(&app.db, None, 1, 6)
        .await
        .unwrap();
    assert_eq!(total, 8);
    assert_eq!(first_page.len(), 6);

    let (second_page, _) = queries::orders::list_filtered(&app.db, None, 2, 6)
        .await
        .unwrap();
    assert_eq!(second_page.len(), 2);
}

#[tokio::test]
async fn customers_list_aggregates_pending_and_paid_totals() {
    let app = TestApp::new().await;
    let amy = app.seed_customer("Amy Burns").await;
    let idle = app.seed_customer("Balazs Orban").await;
    let product = app.seed_product("Club Soda", dec!(2.00), 50).await;

    app.services
        .orders
        .place_order(PlaceOrderRequest {
            customer_id: amy.id,
            product_id: product.id,
            quantity: 3,
            status: OrderStatus::Paid,
        })
        .await
        .unwrap();
    app.services
        .orders
        .place_order(PlaceOrderRequest {
            customer_id: amy.id,
            product_id: product.id,
            quantity: 5,
            status: OrderStatus::Pending,
        })
        .await
        .unwrap();

    let (rows, total) = queries::customers::list_with_totals(&app.db, None, 1, 6)
        .await
        .unwrap();
    assert_eq!(total, 2);

    let amy_row = rows.iter().find(|r| r.id == amy.id).expect("amy listed");
    assert_eq!(amy_row.total_orders, 2);
    assert_eq!(amy_row.total_paid, dec!(6.00));
    assert_eq!(amy_row.total_pending, dec!(10.00));

    let idle_row = rows.iter().find(|r| r.id == idle.id).expect("idle listed");
    assert_eq!(idle_row.total_orders, 0);
    assert_eq!(idle_row.total_paid, dec!(0.00));
}

#[tokio::test]
async fn dashboard_cards_split_paid_and_pending() {
    let app = TestApp::new().await;
    let customer = app.seed_customer("Michael Novotny").await;
    let product = app.seed_product("Sliced Cheese", dec!(4.00), 40).await;

    app.services
        .orders
        .place_order(PlaceOrderRequest {
            customer_id: customer.id,
            product_id: product.id,
            quantity: 2,
            status: OrderStatus::Paid,
        })
        .await
        .unwrap();
    app.services
        .orders
        .place_order(PlaceOrderRequest {
            customer_id: customer.id,
            product_id: product.id,
            quantity: 1,
            status: OrderStatus::Pending,
        })
        .await
        .unwrap();

    let cards = queries::dashboard::card_data(&app.db).await.unwrap();
    assert_eq!(cards.order_count, 2);
    assert_eq!(cards.customer_count, 1);
    assert_eq!(cards.total_paid, dec!(8.00));
    assert_eq!(cards.total_pending, dec!(4.00));
}

#[tokio::test]
async fn product_search_matches_name_and_status() {
    let app = TestApp::new().await;
    app.seed_product("Sparkling Water", dec!(1.50), 10).await;
    app.seed_product("Still Water", dec!(1.00), 0).await;

    let (by_name, _) = queries::products::list_filtered(&app.db, Some("Sparkling"), 1, 6)
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "Sparkling Water");

    let (by_status, _) = queries::products::list_filtered(&app.db, Some("out-of-stock"), 1, 6)
        .await
        .unwrap();
    assert_eq!(by_status.len(), 1);
    assert_eq!(by_status[0].name, "Still Water");
}

#[tokio::test]
async fn latest_orders_returns_at_most_five() {
    let app = TestApp::new().await;
    let customer = app.seed_customer("Steph Dietz").await;
    let product = app.seed_product("Canned Beans", dec!(1.20), 100).await;

    for _ in 0..7 {
        app.services
            .orders
            .place_order(PlaceOrderRequest {
                customer_id: customer.id,
                product_id: product.id,
                quantity: 1,
                status: OrderStatus::Paid,
            })
            .await
            .unwrap();
    }

    let latest = queries::orders::latest(&app.db).await.unwrap();
    assert_eq!(latest.len(), 5);
}
