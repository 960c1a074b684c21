//! Order ledger records shared across services

use crate::error::{Error, Result};
use crate::snapshot::encode_snapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum tolerated gap between a client-supplied total and the recomputed
/// line sum, in currency units
pub const TOTAL_EPSILON: f64 = 0.01;

/// Order status at the API boundary
///
/// Stored orders keep a plain string so historical rows with unexpected
/// values remain readable; only these two values are accepted on writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, not yet fulfilled
    Pending,
    /// Order fulfilled and delivered
    Delivered,
}

impl OrderStatus {
    /// Canonical string form persisted in the ledger
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Delivered => "delivered",
        }
    }
}

/// One frozen cart line inside an order snapshot
///
/// Field names are part of the persisted blob format and must not change:
/// historical orders are the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product name at order time
    pub name: String,

    /// Unit price at order time (floating decimal, as in the ledger format)
    pub price: f64,

    /// Units purchased
    pub quantity: u32,
}

impl OrderItem {
    /// Line amount: unit price times quantity
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Sum of line amounts across a cart
pub fn line_sum(items: &[OrderItem]) -> f64 {
    items.iter().map(OrderItem::line_total).sum()
}

/// A placed order in the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier
    pub id: Uuid,

    /// Owning user, when the buyer was signed in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    /// Frozen cart lines, serialized as an opaque JSON text blob
    pub items: String,

    /// Order total, verified against the line sum at creation
    pub total: f64,

    /// Fulfilment status (`pending` or `delivered` when written by this
    /// service; arbitrary strings from older rows are tolerated on read)
    pub status: String,

    /// Delivery address
    pub address: String,

    /// Contact string (phone or email, free text)
    pub contact: String,

    /// When the order was placed
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create a new pending order from validated cart lines.
    ///
    /// Rejects empty carts, zero quantities, blank names, blank
    /// address/contact, and totals that deviate from the recomputed line sum
    /// by more than [`TOTAL_EPSILON`].
    pub fn new(
        items: &[OrderItem],
        total: f64,
        address: String,
        contact: String,
        user_id: Option<Uuid>,
    ) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::Validation("order must contain at least one item".into()));
        }

        for item in items {
            if item.name.trim().is_empty() {
                return Err(Error::Validation("item name must not be empty".into()));
            }
            if item.quantity == 0 {
                return Err(Error::Validation(format!(
                    "item '{}' has zero quantity",
                    item.name
                )));
            }
        }

        if address.trim().is_empty() {
            return Err(Error::Validation("address must not be empty".into()));
        }
        if contact.trim().is_empty() {
            return Err(Error::Validation("contact must not be empty".into()));
        }

        let computed = line_sum(items);
        if (computed - total).abs() > TOTAL_EPSILON {
            return Err(Error::TotalMismatch {
                supplied: total,
                computed,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            items: encode_snapshot(items)?,
            total,
            status: OrderStatus::Pending.as_str().to_string(),
            address,
            contact,
            created_at: Utc::now(),
        })
    }

    /// Whether this order counts as delivered for reporting purposes
    /// (case-insensitive; any other status buckets as pending)
    pub fn is_delivered(&self) -> bool {
        self.status.eq_ignore_ascii_case(OrderStatus::Delivered.as_str())
    }
}
