use thiserror::Error;

use crate::OrderId;

/// Errors that can occur when interacting with the order store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No order is stored under the given identifier.
    #[error("Order not found: {0}")]
    NotFound(OrderId),
}

/// Result type for order store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Returns the ID that was looked up.
    pub fn order_id(&self) -> &OrderId {
        match self {
            StoreError::NotFound(id) => id,
        }
    }
}
