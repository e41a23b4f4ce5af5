//! Domain layer for the order processing service.
//!
//! This crate provides the shared data model:
//! - [`Order`] record with its identifiers and timestamps
//! - [`OrderStatus`] forward-only lifecycle
//! - [`CreateOrder`] command with request validation

pub mod order;

pub use common::OrderId;
pub use order::{CreateOrder, CustomerId, ItemId, Order, OrderError, OrderStatus, RestaurantId};
