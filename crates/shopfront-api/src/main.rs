//! Shopfront API Service
//!
//! REST API for the storefront: catalog, order ledger, reviews, gallery,
//! settings, and the admin dashboard.

use anyhow::{Context, Result};
use chrono::Duration;
use shopfront_api::config::Config;
use shopfront_api::{create_router, storage, AppState, RedisStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopfront_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Shopfront API Service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Redis URL: {}", config.redis_url);
    info!("Listening on {}", config.api_address());

    // Initialize storage
    let store = RedisStore::new(&config.redis_url)
        .await
        .context("Failed to initialize storage")?;
    let store: Arc<dyn shopfront_api::Store> = Arc::new(store);

    // One-time idempotent bootstrap, gated by the persisted marker
    storage::seed(
        store.as_ref(),
        &config.admin_email,
        &config.admin_password,
        &config.hero_image,
    )
    .await
    .context("Failed to seed store")?;

    // Create application state
    let state = AppState::new(Arc::clone(&store), Duration::hours(config.token_ttl_hours));

    // Create router
    let app = create_router(state);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(&config.api_address())
        .await
        .with_context(|| format!("Failed to bind to {}", config.api_address()))?;

    info!(
        "Shopfront API running on http://{}",
        config.api_address()
    );

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
