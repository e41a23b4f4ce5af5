//! Order record.

use chrono::{DateTime, Utc};
use common::OrderId;
use serde::{Deserialize, Serialize};

use super::{CreateOrder, CustomerId, ItemId, OrderStatus, RestaurantId};

/// An order tracked from creation to a terminal status.
///
/// The order store owns the canonical copy. Everything handed out to callers
/// is a clone, so readers never observe a half-applied update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,

    /// Customer who placed the order.
    pub customer_id: CustomerId,

    /// Restaurant the order was placed with.
    pub restaurant_id: RestaurantId,

    /// Ordered line items.
    pub items: Vec<ItemId>,

    /// Current status.
    pub status: OrderStatus,

    /// When the order was recorded.
    pub created_at: DateTime<Utc>,

    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Builds a `Pending` order from a creation command.
    ///
    /// The command is expected to have passed [`CreateOrder::validate`].
    pub fn new(id: OrderId, cmd: CreateOrder, now: DateTime<Utc>) -> Self {
        Self {
            id,
            customer_id: cmd.customer_id,
            restaurant_id: cmd.restaurant_id,
            items: cmd.items,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets a new status and bumps `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the wall clock does.
    pub fn set_status(&mut self, status: OrderStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = self.updated_at.max(now);
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
