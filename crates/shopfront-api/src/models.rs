//! Persistent records for the storefront service
//!
//! Order records live in `shopfront-common` because the analytics crate
//! shares them; everything here is service-local.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopfront_auth::Role;
use uuid::Uuid;

/// A catalog product
///
/// Updates are destructive overwrites; no history is kept. Placed orders
/// freeze their own copy of name and price, so editing a product never
/// changes the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Unit price (floating decimal, matching the ledger format)
    pub price: f64,

    /// Free-text description
    pub description: String,

    /// Benefit phrases as one comma-joined string
    pub benefits: String,

    /// Image reference (URL or asset path)
    pub image: String,

    /// When the product was created
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create a new product record
    pub fn new(
        name: String,
        price: f64,
        description: String,
        benefits: String,
        image: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            price,
            description,
            benefits,
            image,
            created_at: Utc::now(),
        }
    }
}

/// Default star rating when a reviewer omits one
pub const DEFAULT_RATING: u8 = 5;

/// A customer review; no user linkage, no moderation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Unique review identifier
    pub id: Uuid,

    /// Author display name
    pub name: String,

    /// Free-text comment
    pub comment: String,

    /// Star rating, 1 to 5
    pub rating: u8,

    /// When the review was posted
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Create a new review; a missing rating defaults to five stars
    pub fn new(name: String, comment: String, rating: Option<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            comment,
            rating: rating.unwrap_or(DEFAULT_RATING),
            created_at: Utc::now(),
        }
    }
}

/// A gallery photo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Unique image identifier
    pub id: Uuid,

    /// Image reference (URL or asset path)
    pub url: String,

    /// Optional caption
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// When the image was added
    pub created_at: DateTime<Utc>,
}

impl GalleryImage {
    /// Create a new gallery record
    pub fn new(url: String, caption: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url,
            caption,
            created_at: Utc::now(),
        }
    }
}

/// A registered user, keyed by email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Login email, unique
    pub email: String,

    /// Salted password digest in `salt$digest` form
    pub password_hash: String,

    /// Principal role
    pub role: Role,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Server-side record for an issued bearer token
///
/// The token secret itself is never stored; `digest` is the sha-256 verifier
/// recomputed from the presented token on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Token identifier embedded in the bearer string
    pub token_id: Uuid,

    /// Role granted to the bearer
    pub role: Role,

    /// Verifier digest binding token id, role, and secret
    pub digest: String,

    /// Absolute expiry; the record TTLs out of storage at this instant
    pub expires_at: DateTime<Utc>,
}
