//! Storage seam for the storefront service
//!
//! [`Store`] abstracts the persistence backend: [`RedisStore`] in
//! production, [`MemoryStore`] for tests and daemonless development runs.
//! Every method is one atomic operation on a single record (plus its index);
//! no multi-store transaction exists anywhere in this service.

mod memory;
mod redis;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

use crate::models::{GalleryImage, Product, Review, TokenRecord, User};
use anyhow::Result;
use async_trait::async_trait;
use shopfront_auth::{hash_password, Role};
use shopfront_common::Order;
use tracing::info;
use uuid::Uuid;

/// Settings key guarding the one-time bootstrap
pub const SEEDED_KEY: &str = "seeded";

/// Settings key for the storefront hero image
pub const HERO_IMAGE_KEY: &str = "hero_image";

/// Persistence backend for every storefront collection
#[async_trait]
pub trait Store: Send + Sync {
    // Catalog
    async fn create_product(&self, product: &Product) -> Result<()>;
    async fn get_product(&self, id: Uuid) -> Result<Option<Product>>;
    async fn list_products(&self) -> Result<Vec<Product>>;
    /// Destructive overwrite; returns false when the product does not exist
    async fn update_product(&self, product: &Product) -> Result<bool>;
    async fn delete_product(&self, id: Uuid) -> Result<bool>;

    // Order ledger
    /// Append exactly one ledger row; never touches any other collection
    async fn append_order(&self, order: &Order) -> Result<()>;
    async fn get_order(&self, id: Uuid) -> Result<Option<Order>>;
    /// Newest first
    async fn list_orders(&self) -> Result<Vec<Order>>;
    /// Rewrites only the status field; returns false when the order is absent
    async fn update_order_status(&self, id: Uuid, status: &str) -> Result<bool>;

    // Reviews
    async fn add_review(&self, review: &Review) -> Result<()>;
    /// Newest first
    async fn list_reviews(&self) -> Result<Vec<Review>>;
    async fn delete_review(&self, id: Uuid) -> Result<bool>;

    // Gallery
    async fn add_image(&self, image: &GalleryImage) -> Result<()>;
    /// Newest first
    async fn list_images(&self) -> Result<Vec<GalleryImage>>;
    async fn delete_image(&self, id: Uuid) -> Result<bool>;

    // Settings
    async fn get_setting(&self, key: &str) -> Result<Option<String>>;
    async fn set_setting(&self, key: &str, value: &str) -> Result<()>;

    // Users
    /// Returns false when the email is already registered
    async fn create_user(&self, user: &User) -> Result<bool>;
    async fn get_user(&self, email: &str) -> Result<Option<User>>;

    // Tokens
    /// Stores the record with a TTL ending at its expiry
    async fn put_token(&self, record: &TokenRecord) -> Result<()>;
    async fn get_token(&self, token_id: Uuid) -> Result<Option<TokenRecord>>;
}

/// One-time idempotent bootstrap, gated by the persisted [`SEEDED_KEY`]
/// marker.
///
/// Creates the admin account and the default hero image. Returns true when
/// seeding ran, false when the marker was already present.
pub async fn seed(
    store: &dyn Store,
    admin_email: &str,
    admin_password: &str,
    hero_image: &str,
) -> Result<bool> {
    if store.get_setting(SEEDED_KEY).await?.is_some() {
        info!("Store already seeded, skipping bootstrap");
        return Ok(false);
    }

    let admin = User {
        email: admin_email.to_string(),
        password_hash: hash_password(admin_password),
        role: Role::Admin,
        created_at: chrono::Utc::now(),
    };
    store.create_user(&admin).await?;

    store.set_setting(HERO_IMAGE_KEY, hero_image).await?;
    store.set_setting(SEEDED_KEY, "true").await?;

    info!("Seeded store with admin account: {}", admin_email);
    Ok(true)
}
