//! Opaque text-blob codec for frozen order snapshots
//!
//! Each ledger row embeds its cart lines as a JSON array of
//! `{name, price, quantity}` records. The encoding is append-only history:
//! readers must keep accepting every blob ever written.

use crate::error::Result;
use crate::order::OrderItem;

/// Serialize cart lines into the persisted snapshot form
pub fn encode_snapshot(items: &[OrderItem]) -> Result<String> {
    Ok(serde_json::to_string(items)?)
}

/// Parse a persisted snapshot back into cart lines
pub fn decode_snapshot(blob: &str) -> Result<Vec<OrderItem>> {
    Ok(serde_json::from_str(blob)?)
}
