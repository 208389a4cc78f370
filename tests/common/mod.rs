#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use tokio::sync::mpsc;
use uuid::Uuid;

use inventory_ledger_api::{
    api_v1_routes,
    auth::{AuthConfig, AuthService, Role},
    config::AppConfig,
    db,
    entities::{
        customer,
        product::{self, ProductCategory, ProductStatus},
    },
    events::{self, EventSender},
    handlers::AppServices,
    AppState,
};

const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only";

/// Test harness backed by an in-memory SQLite database. The pool is pinned
/// to a single connection so every query sees the same database.
pub struct TestApp {
    pub db: Arc<DatabaseConnection>,
    pub services: AppServices,
    pub event_sender: EventSender,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub async fn new() -> Self {
        let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
        opt.max_connections(1).min_connections(1).sqlx_logging(false);

        let pool = Database::connect(opt).await.expect("sqlite connection");
        db::run_migrations(&pool).await.expect("migrations");

        let (event_tx, event_rx) = mpsc::channel(64);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let pool = Arc::new(pool);
        let services = AppServices::new(pool.clone(), event_sender.clone());

        Self {
            db: pool,
            services,
            event_sender,
            _event_task: event_task,
        }
    }

    /// The v1 router wired exactly like the binary: shared state plus the
    /// auth service injected into request extensions.
    pub fn router(&self) -> (axum::Router, Arc<AuthService>) {
        let auth_service = Arc::new(AuthService::new(AuthConfig::new(
            TEST_JWT_SECRET.to_string(),
            3600,
        )));

        let state = AppState {
            db: self.db.clone(),
            config: test_config(),
            event_sender: self.event_sender.clone(),
            services: self.services.clone(),
        };

        let auth_for_layer = auth_service.clone();
        let router = axum::Router::new()
            .nest("/api/v1", api_v1_routes())
            .layer(axum::middleware::from_fn_with_state(
                auth_for_layer,
                |axum::extract::State(auth): axum::extract::State<Arc<AuthService>>,
                 mut req: axum::http::Request<axum::body::Body>,
                 next: axum::middleware::Next| async move {
                    req.extensions_mut().insert(auth);
                    next.run(req).await
                },
            ))
            .with_state(state);

        (router, auth_service)
    }

    pub fn token(&self, auth_service: &AuthService, role: Role) -> String {
        auth_service
            .generate_token("test-user", role)
            .expect("token issued")
    }

    pub async fn seed_customer(&self, name: &str) -> customer::Model {
        customer::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            email: Set(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
            image_url: Set("/customers/avatar.png".to_string()),
        }
        .insert(&*self.db)
        .await
        .expect("seed customer")
    }

    pub async fn seed_product(&self, name: &str, price: Decimal, stock: i32) -> product::Model {
        self.seed_product_in(name, ProductCategory::Snacks, price, stock)
            .await
    }

    pub async fn seed_product_in(
        &self,
        name: &str,
        category: ProductCategory,
        price: Decimal,
        stock: i32,
    ) -> product::Model {
        product::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            category: Set(category),
            price: Set(price),
            stock: Set(stock),
            expiry: Set(if category.is_perishable() {
                NaiveDate::from_ymd_opt(2026, 12, 31)
            } else {
                None
            }),
            status: Set(ProductStatus::from_stock(stock)),
        }
        .insert(&*self.db)
        .await
        .expect("seed product")
    }

    /// Current stock of a product, straight from the table.
    pub async fn stock_of(&self, product_id: Uuid) -> i32 {
        self.services
            .products
            .get(product_id)
            .await
            .expect("product exists")
            .stock
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiration: 3600,
        host: "127.0.0.1".to_string(),
        port: 18080,
        environment: "test".to_string(),
        log_level: "debug".to_string(),
        log_json: false,
        auto_migrate: true,
        db_max_connections: 1,
        db_min_connections: 1,
        cors_allowed_origins: None,
    }
}
