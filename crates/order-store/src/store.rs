use async_trait::async_trait;

use crate::{Order, OrderId, OrderStatus, Result};

/// Core trait for order store implementations.
///
/// The store is the single source of truth for order state. It serializes
/// writers against each other and against readers, and hands out clones so
/// callers can never mutate the canonical copy.
///
/// The store does not judge whether a status change is a legal forward step.
/// Transition order is guaranteed by the worker pool handing each order ID to
/// exactly one worker; code that calls [`OrderStore::update_status`] outside
/// the pool gives up that guarantee.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts the order, or overwrites the record already stored under its ID.
    async fn save(&self, order: Order);

    /// Returns a copy of the current record.
    ///
    /// Fails with `NotFound` if the ID is absent.
    async fn get(&self, id: &OrderId) -> Result<Order>;

    /// Sets the status and `updated_at` of a stored order and returns the
    /// updated copy.
    ///
    /// Fails with `NotFound` if the ID is absent, in which case nothing is
    /// written.
    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<Order>;

    /// Returns a snapshot of every stored order, in no particular order.
    async fn get_all(&self) -> Vec<Order>;

    /// Returns the number of stored orders.
    ///
    /// The default clones every order; implementations should override it.
    async fn count(&self) -> usize {
        self.get_all().await.len()
    }
}

/// Extension trait providing convenience methods for order stores.
#[async_trait]
pub trait OrderStoreExt: OrderStore {
    /// Checks if an order is stored under the given ID.
    async fn exists(&self, id: &OrderId) -> bool {
        self.get(id).await.is_ok()
    }

    /// Returns the current status of an order.
    async fn status_of(&self, id: &OrderId) -> Result<OrderStatus> {
        Ok(self.get(id).await?.status)
    }

    /// Returns only the orders currently in the given status.
    async fn get_by_status(&self, status: OrderStatus) -> Vec<Order> {
        self.get_all()
            .await
            .into_iter()
            .filter(|order| order.status == status)
            .collect()
    }
}

impl<T: OrderStore> OrderStoreExt for T {}

#[async_trait]
impl<T: OrderStore + ?Sized> OrderStore for std::sync::Arc<T> {
    async fn save(&self, order: Order) {
        (**self).save(order).await
    }

    async fn get(&self, id: &OrderId) -> Result<Order> {
        (**self).get(id).await
    }

    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<Order> {
        (**self).update_status(id, status).await
    }

    async fn get_all(&self) -> Vec<Order> {
        (**self).get_all().await
    }

    async fn count(&self) -> usize {
        (**self).count().await
    }
}
