//! Order record and related types.

mod commands;
mod record;
mod state;
mod value_objects;

pub use commands::CreateOrder;
pub use record::Order;
pub use state::OrderStatus;
pub use value_objects::{CustomerId, ItemId, RestaurantId};

use thiserror::Error;

/// Errors raised while validating an order creation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Customer ID is required.
    #[error("Customer ID is required")]
    CustomerIdRequired,

    /// Restaurant ID is required.
    #[error("Restaurant ID is required")]
    RestaurantIdRequired,

    /// Order has no items.
    #[error("Order has no items")]
    NoItems,
}
