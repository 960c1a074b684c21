//! Redis storage backend
//!
//! Key layout: one JSON value per record (`product:{id}`, `order:{id}`,
//! `review:{id}`, `gallery:{id}`, `user:{email}`, `token:{id}`,
//! `setting:{key}`) plus one index list per collection, LPUSH'd so reads come
//! back newest first. Token records are written with a TTL so expiry needs no
//! sweeper.

use crate::models::{GalleryImage, Product, Review, TokenRecord, User};
use crate::storage::Store;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use shopfront_common::Order;
use tracing::{debug, info};
use uuid::Uuid;

/// Production storage backed by Redis
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis and build a managed connection
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).context("Failed to create Redis client")?;

        let conn = ConnectionManager::new(client)
            .await
            .context("Failed to connect to Redis")?;

        info!("Connected to Redis at {}", redis_url);

        Ok(Self { conn })
    }

    async fn put_record<T: serde::Serialize>(&self, key: &str, index: &str, record: &T) -> Result<()> {
        let mut conn = self.conn.clone();

        let json = serde_json::to_string(record).context("Failed to serialize record")?;

        let _: () = conn.set(key, json).await?;
        let _: () = conn.lpush(index, key_id(key)).await?;

        Ok(())
    }

    async fn get_record<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.conn.clone();

        let json: Option<String> = conn.get(key).await?;

        match json {
            Some(data) => {
                let record = serde_json::from_str(&data).context("Failed to deserialize record")?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn list_records<T: serde::de::DeserializeOwned>(
        &self,
        index: &str,
        prefix: &str,
    ) -> Result<Vec<T>> {
        let mut conn = self.conn.clone();

        let ids: Vec<String> = conn.lrange(index, 0, -1).await?;

        let mut records = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(record) = self.get_record(&format!("{prefix}:{id}")).await? {
                records.push(record);
            }
        }

        Ok(records)
    }

    async fn delete_record(&self, key: &str, index: &str) -> Result<bool> {
        let mut conn = self.conn.clone();

        let deleted: bool = conn.del(key).await?;

        if deleted {
            let _: () = conn.lrem(index, 0, key_id(key)).await?;
            debug!("Deleted {}", key);
        }

        Ok(deleted)
    }
}

/// Record id portion of a `prefix:id` key
fn key_id(key: &str) -> &str {
    key.split_once(':').map_or(key, |(_, id)| id)
}

#[async_trait]
impl Store for RedisStore {
    async fn create_product(&self, product: &Product) -> Result<()> {
        self.put_record(&format!("product:{}", product.id), "products:all", product)
            .await
    }

    async fn get_product(&self, id: Uuid) -> Result<Option<Product>> {
        self.get_record(&format!("product:{id}")).await
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        self.list_records("products:all", "product").await
    }

    async fn update_product(&self, product: &Product) -> Result<bool> {
        let mut conn = self.conn.clone();
        let key = format!("product:{}", product.id);

        let exists: bool = conn.exists(&key).await?;
        if !exists {
            debug!("Product not found for update: {}", product.id);
            return Ok(false);
        }

        let json = serde_json::to_string(product).context("Failed to serialize product")?;
        let _: () = conn.set(&key, json).await?;

        Ok(true)
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool> {
        self.delete_record(&format!("product:{id}"), "products:all")
            .await
    }

    async fn append_order(&self, order: &Order) -> Result<()> {
        self.put_record(&format!("order:{}", order.id), "orders:all", order)
            .await?;

        info!("Appended order {} to ledger", order.id);
        Ok(())
    }

    async fn get_order(&self, id: Uuid) -> Result<Option<Order>> {
        self.get_record(&format!("order:{id}")).await
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        self.list_records("orders:all", "order").await
    }

    async fn update_order_status(&self, id: Uuid, status: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let key = format!("order:{id}");

        let Some(mut order) = self.get_order(id).await? else {
            return Ok(false);
        };

        order.status = status.to_string();

        let json = serde_json::to_string(&order).context("Failed to serialize order")?;
        let _: () = conn.set(&key, json).await?;

        info!("Order {} status set to {}", id, status);
        Ok(true)
    }

    async fn add_review(&self, review: &Review) -> Result<()> {
        self.put_record(&format!("review:{}", review.id), "reviews:all", review)
            .await
    }

    async fn list_reviews(&self) -> Result<Vec<Review>> {
        self.list_records("reviews:all", "review").await
    }

    async fn delete_review(&self, id: Uuid) -> Result<bool> {
        self.delete_record(&format!("review:{id}"), "reviews:all")
            .await
    }

    async fn add_image(&self, image: &GalleryImage) -> Result<()> {
        self.put_record(&format!("gallery:{}", image.id), "gallery:all", image)
            .await
    }

    async fn list_images(&self) -> Result<Vec<GalleryImage>> {
        self.list_records("gallery:all", "gallery").await
    }

    async fn delete_image(&self, id: Uuid) -> Result<bool> {
        self.delete_record(&format!("gallery:{id}"), "gallery:all")
            .await
    }

    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();

        let value: Option<String> = conn.get(format!("setting:{key}")).await?;
        Ok(value)
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();

        let _: () = conn.set(format!("setting:{key}"), value).await?;
        Ok(())
    }

    async fn create_user(&self, user: &User) -> Result<bool> {
        let mut conn = self.conn.clone();
        let key = format!("user:{}", user.email);

        let exists: bool = conn.exists(&key).await?;
        if exists {
            debug!("User already exists: {}", user.email);
            return Ok(false);
        }

        let json = serde_json::to_string(user).context("Failed to serialize user")?;
        let _: () = conn.set(&key, json).await?;

        info!("Created user {}", user.email);
        Ok(true)
    }

    async fn get_user(&self, email: &str) -> Result<Option<User>> {
        self.get_record(&format!("user:{email}")).await
    }

    async fn put_token(&self, record: &TokenRecord) -> Result<()> {
        let mut conn = self.conn.clone();
        let key = format!("token:{}", record.token_id.simple());

        let ttl = (record.expires_at - Utc::now()).num_seconds().max(1) as u64;

        let json = serde_json::to_string(record).context("Failed to serialize token record")?;
        let _: () = conn.set_ex(&key, json, ttl).await?;

        Ok(())
    }

    async fn get_token(&self, token_id: Uuid) -> Result<Option<TokenRecord>> {
        self.get_record(&format!("token:{}", token_id.simple()))
            .await
    }
}
