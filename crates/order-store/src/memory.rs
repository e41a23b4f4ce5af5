use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{Order, OrderId, OrderStatus, Result, StoreError, store::OrderStore};

/// In-memory order store.
///
/// Orders live in a `HashMap` behind a read-write lock: `get` and `get_all`
/// run concurrently, `save` and `update_status` take the lock exclusively.
/// Cloning the store shares the same map. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of orders stored.
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Returns true if no orders are stored.
    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn save(&self, order: Order) {
        let mut orders = self.orders.write().await;
        orders.insert(order.id.clone(), order);
    }

    async fn get(&self, id: &OrderId) -> Result<Order> {
        let orders = self.orders.read().await;
        orders
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<Order> {
        let mut orders = self.orders.write().await;
        let order = orders
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let previous = order.status;
        order.set_status(status, Utc::now());
        tracing::debug!(order_id = %id, from = %previous, to = %status, "order status updated");

        Ok(order.clone())
    }

    async fn get_all(&self) -> Vec<Order> {
        let orders = self.orders.read().await;
        orders.values().cloned().collect()
    }

    async fn count(&self) -> usize {
        self.len().await
    }
}

#[cfg(test)]
mod tests {
    use domain::CreateOrder;

    use super::*;
    use crate::OrderStoreExt;

    fn create_test_order(id: &str) -> Order {
        Order::new(
            OrderId::new(id),
            CreateOrder::new("cust-1", "rest-1", ["burger", "fries"]),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn save_and_get() {
        let store = InMemoryOrderStore::new();
        let order = create_test_order("ORD-1");

        store.save(order.clone()).await;

        let stored = store.get(&order.id).await.unwrap();
        assert_eq!(stored, order);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn save_overwrites_same_id() {
        let store = InMemoryOrderStore::new();
        let mut order = create_test_order("ORD-1");
        store.save(order.clone()).await;

        order.restaurant_id = "rest-2".into();
        store.save(order.clone()).await;

        let stored = store.get(&order.id).await.unwrap();
        assert_eq!(stored.restaurant_id.as_str(), "rest-2");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn get_missing_order_is_not_found() {
        let store = InMemoryOrderStore::new();
        let id = OrderId::new("ORD-404");

        let result = store.get(&id).await;
        assert_eq!(result, Err(StoreError::NotFound(id)));
    }

    #[tokio::test]
    async fn update_status_missing_order_writes_nothing() {
        let store = InMemoryOrderStore::new();
        let id = OrderId::new("ORD-404");

        let result = store.update_status(&id, OrderStatus::Processing).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert!(store.is_empty().await);
        assert!(!store.exists(&id).await);
    }

    #[tokio::test]
    async fn update_status_sets_status_and_timestamp() {
        let store = InMemoryOrderStore::new();
        let order = create_test_order("ORD-1");
        store.save(order.clone()).await;

        let updated = store
            .update_status(&order.id, OrderStatus::Processing)
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Processing);
        assert!(updated.updated_at >= order.updated_at);
        assert_eq!(updated.created_at, order.created_at);
        assert_eq!(
            store.status_of(&order.id).await.unwrap(),
            OrderStatus::Processing
        );
    }

    #[tokio::test]
    async fn update_status_does_not_check_transitions() {
        let store = InMemoryOrderStore::new();
        let order = create_test_order("ORD-1");
        store.save(order.clone()).await;

        // The store stays permissive; ordering is the worker's job.
        let updated = store
            .update_status(&order.id, OrderStatus::Completed)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Completed);
    }

    #[tokio::test]
    async fn returned_copies_do_not_alias_store() {
        let store = InMemoryOrderStore::new();
        let order = create_test_order("ORD-1");
        store.save(order.clone()).await;

        let mut copy = store.get(&order.id).await.unwrap();
        copy.status = OrderStatus::Failed;

        assert_eq!(
            store.get(&order.id).await.unwrap().status,
            OrderStatus::Pending
        );
    }

    #[tokio::test]
    async fn get_all_and_by_status() {
        let store = InMemoryOrderStore::new();
        for i in 0..3 {
            store.save(create_test_order(&format!("ORD-{i}"))).await;
        }
        store
            .update_status(&OrderId::new("ORD-1"), OrderStatus::Processing)
            .await
            .unwrap();

        assert_eq!(store.get_all().await.len(), 3);
        let processing = store.get_by_status(OrderStatus::Processing).await;
        assert_eq!(processing.len(), 1);
        assert_eq!(processing[0].id.as_str(), "ORD-1");
        assert_eq!(store.get_by_status(OrderStatus::Pending).await.len(), 2);
    }

    #[tokio::test]
    async fn clones_share_the_same_map() {
        let store = InMemoryOrderStore::new();
        let other = store.clone();
        store.save(create_test_order("ORD-1")).await;

        assert!(other.exists(&OrderId::new("ORD-1")).await);
    }

    #[tokio::test]
    async fn count_tracks_distinct_ids() {
        let store = InMemoryOrderStore::new();
        assert_eq!(store.count().await, 0);

        store.save(create_test_order("ORD-1")).await;
        store.save(create_test_order("ORD-2")).await;
        store.save(create_test_order("ORD-2")).await;

        let shared: Arc<dyn OrderStore> = Arc::new(store.clone());
        assert_eq!(store.count().await, 2);
        assert_eq!(shared.count().await, 2);
    }
}
