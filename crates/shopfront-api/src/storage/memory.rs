//! In-memory storage backend
//!
//! Mirrors the Redis backend's observable behavior, including newest-first
//! listings and token expiry, so integration tests and daemonless local runs
//! exercise the same contract.

use crate::models::{GalleryImage, Product, Review, TokenRecord, User};
use crate::storage::Store;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use shopfront_common::Order;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    products: Vec<Product>,
    orders: Vec<Order>,
    reviews: Vec<Review>,
    gallery: Vec<GalleryImage>,
    settings: HashMap<String, String>,
    users: HashMap<String, User>,
    tokens: HashMap<Uuid, TokenRecord>,
}

/// Volatile storage for tests and local development
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_product(&self, product: &Product) -> Result<()> {
        self.inner.lock().await.products.push(product.clone());
        Ok(())
    }

    async fn get_product(&self, id: Uuid) -> Result<Option<Product>> {
        let inner = self.inner.lock().await;
        Ok(inner.products.iter().find(|p| p.id == id).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let inner = self.inner.lock().await;
        Ok(inner.products.iter().rev().cloned().collect())
    }

    async fn update_product(&self, product: &Product) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        match inner.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        let before = inner.products.len();
        inner.products.retain(|p| p.id != id);
        Ok(inner.products.len() < before)
    }

    async fn append_order(&self, order: &Order) -> Result<()> {
        self.inner.lock().await.orders.push(order.clone());
        Ok(())
    }

    async fn get_order(&self, id: Uuid) -> Result<Option<Order>> {
        let inner = self.inner.lock().await;
        Ok(inner.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let inner = self.inner.lock().await;
        Ok(inner.orders.iter().rev().cloned().collect())
    }

    async fn update_order_status(&self, id: Uuid, status: &str) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        match inner.orders.iter_mut().find(|o| o.id == id) {
            Some(order) => {
                order.status = status.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn add_review(&self, review: &Review) -> Result<()> {
        self.inner.lock().await.reviews.push(review.clone());
        Ok(())
    }

    async fn list_reviews(&self) -> Result<Vec<Review>> {
        let inner = self.inner.lock().await;
        Ok(inner.reviews.iter().rev().cloned().collect())
    }

    async fn delete_review(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        let before = inner.reviews.len();
        inner.reviews.retain(|r| r.id != id);
        Ok(inner.reviews.len() < before)
    }

    async fn add_image(&self, image: &GalleryImage) -> Result<()> {
        self.inner.lock().await.gallery.push(image.clone());
        Ok(())
    }

    async fn list_images(&self) -> Result<Vec<GalleryImage>> {
        let inner = self.inner.lock().await;
        Ok(inner.gallery.iter().rev().cloned().collect())
    }

    async fn delete_image(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        let before = inner.gallery.len();
        inner.gallery.retain(|g| g.id != id);
        Ok(inner.gallery.len() < before)
    }

    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let inner = self.inner.lock().await;
        Ok(inner.settings.get(key).cloned())
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.inner
            .lock()
            .await
            .settings
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn create_user(&self, user: &User) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        if inner.users.contains_key(&user.email) {
            return Ok(false);
        }
        inner.users.insert(user.email.clone(), user.clone());
        Ok(true)
    }

    async fn get_user(&self, email: &str) -> Result<Option<User>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.get(email).cloned())
    }

    async fn put_token(&self, record: &TokenRecord) -> Result<()> {
        self.inner
            .lock()
            .await
            .tokens
            .insert(record.token_id, record.clone());
        Ok(())
    }

    async fn get_token(&self, token_id: Uuid) -> Result<Option<TokenRecord>> {
        let inner = self.inner.lock().await;

        // Match the Redis TTL behavior: expired records are gone.
        Ok(inner
            .tokens
            .get(&token_id)
            .filter(|record| record.expires_at > Utc::now())
            .cloned())
    }
}
