pub mod error;
pub mod order;
pub mod snapshot;

pub use error::{Error, Result};
pub use order::{Order, OrderItem, OrderStatus, TOTAL_EPSILON};
pub use snapshot::{decode_snapshot, encode_snapshot};
