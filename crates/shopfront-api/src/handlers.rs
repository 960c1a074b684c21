//! API request handlers for the storefront service

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopfront_analytics::{compute_dashboard, DashboardStats};
use shopfront_auth::{
    format_token, generate_secret, parse_token, verifier_digest, verify_password, Role,
};
use shopfront_common::{Error, Order, OrderItem, OrderStatus};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{GalleryImage, Product, Review, TokenRecord};
use crate::AppState;

/// API Error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message
        });

        (self.status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::Validation(_) | Error::TotalMismatch { .. } => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials | Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        ApiError {
            status,
            message: err.to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response carrying a fresh bearer token
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

/// Create/update payload for a product
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub price: f64,
    pub description: String,
    /// Benefit phrases as one comma-joined string
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub image: String,
}

/// Generic creation response
#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub success: bool,
    pub id: Uuid,
}

/// Generic mutation response
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

/// Product listing
#[derive(Debug, Serialize)]
pub struct ProductsListResponse {
    pub products: Vec<Product>,
    pub total: usize,
}

/// Checkout payload: frozen cart lines plus the client's computed total
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub address: String,
    pub contact: String,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// Response from order placement
#[derive(Debug, Serialize)]
pub struct PlaceOrderResponse {
    pub success: bool,
    pub order_id: Uuid,
}

/// Order ledger listing, newest first
#[derive(Debug, Serialize)]
pub struct OrdersListResponse {
    pub orders: Vec<Order>,
    pub total: usize,
}

/// Status update payload; only `pending` and `delivered` are accepted
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Dashboard month filter (`Jan` .. `Dec`, or `All`)
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub month: Option<String>,
}

/// New review payload
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub name: String,
    pub comment: String,
    /// Star rating 1-5; omitted means five stars
    #[serde(default)]
    pub rating: Option<u8>,
}

/// Review listing, newest first
#[derive(Debug, Serialize)]
pub struct ReviewsListResponse {
    pub reviews: Vec<Review>,
    pub total: usize,
}

/// New gallery image payload
#[derive(Debug, Deserialize)]
pub struct GalleryRequest {
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

/// Gallery listing, newest first
#[derive(Debug, Serialize)]
pub struct GalleryListResponse {
    pub images: Vec<GalleryImage>,
    pub total: usize,
}

/// Setting update payload
#[derive(Debug, Deserialize)]
pub struct SettingRequest {
    pub value: String,
}

/// Setting value response
#[derive(Debug, Serialize)]
pub struct SettingResponse {
    pub key: String,
    pub value: String,
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

/// Gate for privileged operations.
///
/// Missing header is `Unauthorized` (401); a header that is present but
/// unparseable, unknown, expired, forged, or carries a non-admin role is
/// `Forbidden` (403).
async fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(token) = extract_bearer_token(headers) else {
        return Err(Error::Unauthorized.into());
    };

    let Ok(parsed) = parse_token(token) else {
        return Err(Error::Forbidden.into());
    };

    let Some(record) = state.store.get_token(parsed.token_id).await? else {
        return Err(Error::Forbidden.into());
    };

    if record.expires_at <= Utc::now() {
        return Err(Error::Forbidden.into());
    }

    if verifier_digest(parsed.token_id, record.role, &parsed.secret) != record.digest {
        warn!("Token digest mismatch for token {}", parsed.token_id);
        return Err(Error::Forbidden.into());
    }

    if record.role != Role::Admin {
        return Err(Error::Forbidden.into());
    }

    Ok(())
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "shopfront-api"
    }))
}

/// Verify credentials and issue a bearer token
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state.store.get_user(&payload.email).await?;

    // Unknown email and wrong password take the same path and produce the
    // same response, so the endpoint cannot be used for enumeration.
    let verified = user
        .as_ref()
        .map(|user| verify_password(&payload.password, &user.password_hash).unwrap_or(false))
        .unwrap_or(false);

    let Some(user) = user.filter(|_| verified) else {
        return Err(Error::InvalidCredentials.into());
    };

    let token_id = Uuid::new_v4();
    let secret = generate_secret();
    let expires_at = Utc::now() + state.token_ttl;

    let record = TokenRecord {
        token_id,
        role: user.role,
        digest: verifier_digest(token_id, user.role, &secret),
        expires_at,
    };
    state.store.put_token(&record).await?;

    info!("Issued {} token for {}", user.role, user.email);

    Ok(Json(LoginResponse {
        token: format_token(token_id, &secret),
        role: user.role,
        expires_at,
    }))
}

/// List catalog products
pub async fn list_products_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProductsListResponse>, ApiError> {
    let products = state.store.list_products().await?;
    let total = products.len();

    Ok(Json(ProductsListResponse { products, total }))
}

/// Get one product by id
pub async fn get_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    match state.store.get_product(id).await? {
        Some(product) => Ok(Json(product)),
        None => Err(Error::NotFound(format!("product {id}")).into()),
    }
}

fn validate_product(payload: &ProductRequest) -> Result<(), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(Error::Validation("product name must not be empty".into()).into());
    }
    if payload.price < 0.0 {
        return Err(Error::Validation("product price must not be negative".into()).into());
    }
    Ok(())
}

/// Create a product (admin)
pub async fn create_product_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<IdResponse>, ApiError> {
    require_admin(&state, &headers).await?;
    validate_product(&payload)?;

    let product = Product::new(
        payload.name,
        payload.price,
        payload.description,
        payload.benefits,
        payload.image,
    );
    state.store.create_product(&product).await?;

    info!("Created product {} ({})", product.name, product.id);

    Ok(Json(IdResponse {
        success: true,
        id: product.id,
    }))
}

/// Overwrite a product (admin)
pub async fn update_product_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    require_admin(&state, &headers).await?;
    validate_product(&payload)?;

    let Some(existing) = state.store.get_product(id).await? else {
        return Err(Error::NotFound(format!("product {id}")).into());
    };

    let product = Product {
        id,
        name: payload.name,
        price: payload.price,
        description: payload.description,
        benefits: payload.benefits,
        image: payload.image,
        created_at: existing.created_at,
    };

    if !state.store.update_product(&product).await? {
        return Err(Error::NotFound(format!("product {id}")).into());
    }

    info!("Updated product {}", id);

    Ok(Json(ActionResponse {
        success: true,
        message: format!("Product updated: {id}"),
    }))
}

/// Delete a product (admin)
pub async fn delete_product_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResponse>, ApiError> {
    require_admin(&state, &headers).await?;

    if !state.store.delete_product(id).await? {
        return Err(Error::NotFound(format!("product {id}")).into());
    }

    info!("Deleted product {}", id);

    Ok(Json(ActionResponse {
        success: true,
        message: format!("Product deleted: {id}"),
    }))
}

/// Place an order: validate the cart, verify the total against the line sum,
/// and append exactly one ledger row. No authentication required.
pub async fn place_order_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PlaceOrderRequest>,
) -> Result<Json<PlaceOrderResponse>, ApiError> {
    let order = Order::new(
        &payload.items,
        payload.total,
        payload.address,
        payload.contact,
        payload.user_id,
    )?;

    state.store.append_order(&order).await?;

    info!(
        "Placed order {} ({} items, total {})",
        order.id,
        payload.items.len(),
        order.total
    );

    Ok(Json(PlaceOrderResponse {
        success: true,
        order_id: order.id,
    }))
}

/// List the order ledger, newest first (admin)
pub async fn list_orders_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<OrdersListResponse>, ApiError> {
    require_admin(&state, &headers).await?;

    let orders = state.store.list_orders().await?;
    let total = orders.len();

    Ok(Json(OrdersListResponse { orders, total }))
}

/// Update an order's fulfilment status (admin)
pub async fn update_order_status_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    require_admin(&state, &headers).await?;

    let status = match payload.status.to_ascii_lowercase().as_str() {
        "pending" => OrderStatus::Pending,
        "delivered" => OrderStatus::Delivered,
        other => {
            return Err(Error::Validation(format!("unknown order status '{other}'")).into());
        }
    };

    if !state.store.update_order_status(id, status.as_str()).await? {
        return Err(Error::NotFound(format!("order {id}")).into());
    }

    Ok(Json(ActionResponse {
        success: true,
        message: format!("Order {id} marked {}", status.as_str()),
    }))
}

/// Compute dashboard figures from the full ledger (admin)
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardStats>, ApiError> {
    require_admin(&state, &headers).await?;

    let orders = state.store.list_orders().await?;
    let stats = compute_dashboard(&orders, query.month.as_deref());

    Ok(Json(stats))
}

/// List reviews, newest first
pub async fn list_reviews_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReviewsListResponse>, ApiError> {
    let reviews = state.store.list_reviews().await?;
    let total = reviews.len();

    Ok(Json(ReviewsListResponse { reviews, total }))
}

/// Post a review
pub async fn create_review_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<IdResponse>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(Error::Validation("reviewer name must not be empty".into()).into());
    }
    if payload.comment.trim().is_empty() {
        return Err(Error::Validation("review comment must not be empty".into()).into());
    }
    if let Some(rating) = payload.rating {
        if !(1..=5).contains(&rating) {
            return Err(Error::Validation("rating must be between 1 and 5".into()).into());
        }
    }

    let review = Review::new(payload.name, payload.comment, payload.rating);
    state.store.add_review(&review).await?;

    Ok(Json(IdResponse {
        success: true,
        id: review.id,
    }))
}

/// Delete a review (admin)
pub async fn delete_review_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResponse>, ApiError> {
    require_admin(&state, &headers).await?;

    if !state.store.delete_review(id).await? {
        return Err(Error::NotFound(format!("review {id}")).into());
    }

    Ok(Json(ActionResponse {
        success: true,
        message: format!("Review deleted: {id}"),
    }))
}

/// List gallery images, newest first
pub async fn list_gallery_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GalleryListResponse>, ApiError> {
    let images = state.store.list_images().await?;
    let total = images.len();

    Ok(Json(GalleryListResponse { images, total }))
}

/// Add a gallery image (admin)
pub async fn add_gallery_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<GalleryRequest>,
) -> Result<Json<IdResponse>, ApiError> {
    require_admin(&state, &headers).await?;

    if payload.url.trim().is_empty() {
        return Err(Error::Validation("image url must not be empty".into()).into());
    }

    let image = GalleryImage::new(payload.url, payload.caption);
    state.store.add_image(&image).await?;

    Ok(Json(IdResponse {
        success: true,
        id: image.id,
    }))
}

/// Delete a gallery image (admin)
pub async fn delete_gallery_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResponse>, ApiError> {
    require_admin(&state, &headers).await?;

    if !state.store.delete_image(id).await? {
        return Err(Error::NotFound(format!("gallery image {id}")).into());
    }

    Ok(Json(ActionResponse {
        success: true,
        message: format!("Gallery image deleted: {id}"),
    }))
}

/// Read one setting
pub async fn get_setting_handler(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<SettingResponse>, ApiError> {
    match state.store.get_setting(&key).await? {
        Some(value) => Ok(Json(SettingResponse { key, value })),
        None => Err(Error::NotFound(format!("setting {key}")).into()),
    }
}

/// Write one setting (admin)
pub async fn set_setting_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(key): Path<String>,
    Json(payload): Json<SettingRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    require_admin(&state, &headers).await?;

    state.store.set_setting(&key, &payload.value).await?;

    info!("Setting {} updated", key);

    Ok(Json(ActionResponse {
        success: true,
        message: format!("Setting updated: {key}"),
    }))
}
