//! Order commands.

use super::{CustomerId, ItemId, OrderError, RestaurantId};

/// Command to create a new order.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    /// The customer placing the order.
    pub customer_id: CustomerId,

    /// The restaurant the order is placed with.
    pub restaurant_id: RestaurantId,

    /// Ordered line items, in the order they were requested.
    pub items: Vec<ItemId>,
}

impl CreateOrder {
    /// Creates a new CreateOrder command.
    pub fn new<I>(
        customer_id: impl Into<CustomerId>,
        restaurant_id: impl Into<RestaurantId>,
        items: I,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ItemId>,
    {
        Self {
            customer_id: customer_id.into(),
            restaurant_id: restaurant_id.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks the request shape before an order is created.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.customer_id.is_blank() {
            return Err(OrderError::CustomerIdRequired);
        }
        if self.restaurant_id.is_blank() {
            return Err(OrderError::RestaurantIdRequired);
        }
        if self.items.is_empty() {
            return Err(OrderError::NoItems);
        }
        Ok(())
    }
}
