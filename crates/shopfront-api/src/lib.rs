//! Shopfront REST API
//!
//! Single-storefront backend: product catalog, order ledger, customer
//! reviews, photo gallery, settings, and an admin dashboard aggregated from
//! the ledger.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /api/auth/login` - Credential check, bearer token issuance
//! - `GET/POST /api/products`, `GET/PUT/DELETE /api/products/{id}` - Catalog
//! - `POST /api/orders` - Place an order (public, unauthenticated checkout)
//! - `GET /api/orders` - List the ledger newest first (admin)
//! - `PUT /api/orders/{id}/status` - Mark pending/delivered (admin)
//! - `GET /api/dashboard?month=Jan` - Reporting aggregates (admin)
//! - `GET/POST /api/reviews`, `DELETE /api/reviews/{id}` - Reviews
//! - `GET/POST /api/gallery`, `DELETE /api/gallery/{id}` - Photo gallery
//! - `GET/PUT /api/settings/{key}` - Keyed settings (`hero_image`)

pub mod config;
pub mod handlers;
pub mod models;
pub mod storage;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use chrono::Duration;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use storage::{MemoryStore, RedisStore, Store};

/// Application state shared across handlers
pub struct AppState {
    /// Persistence backend
    pub store: Arc<dyn Store>,

    /// Lifetime of issued bearer tokens
    pub token_ttl: Duration,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<dyn Store>, token_ttl: Duration) -> Self {
        Self { store, token_ttl }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_handler))
        // Access control
        .route("/api/auth/login", post(handlers::login_handler))
        // Catalog
        .route("/api/products", get(handlers::list_products_handler))
        .route("/api/products", post(handlers::create_product_handler))
        .route("/api/products/{id}", get(handlers::get_product_handler))
        .route("/api/products/{id}", put(handlers::update_product_handler))
        .route(
            "/api/products/{id}",
            delete(handlers::delete_product_handler),
        )
        // Order ledger
        .route("/api/orders", post(handlers::place_order_handler))
        .route("/api/orders", get(handlers::list_orders_handler))
        .route(
            "/api/orders/{id}/status",
            put(handlers::update_order_status_handler),
        )
        // Reporting
        .route("/api/dashboard", get(handlers::dashboard_handler))
        // Reviews
        .route("/api/reviews", get(handlers::list_reviews_handler))
        .route("/api/reviews", post(handlers::create_review_handler))
        .route("/api/reviews/{id}", delete(handlers::delete_review_handler))
        // Gallery
        .route("/api/gallery", get(handlers::list_gallery_handler))
        .route("/api/gallery", post(handlers::add_gallery_handler))
        .route("/api/gallery/{id}", delete(handlers::delete_gallery_handler))
        // Settings
        .route("/api/settings/{key}", get(handlers::get_setting_handler))
        .route("/api/settings/{key}", put(handlers::set_setting_handler))
        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}
