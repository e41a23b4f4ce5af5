//! Concurrency tests for the in-memory order store.
//!
//! These tests hammer one shared store from many tasks and check that no
//! write is lost and readers only ever see whole records.

use std::sync::Arc;

use chrono::Utc;
use domain::CreateOrder;
use order_store::{InMemoryOrderStore, Order, OrderId, OrderStatus, OrderStore, StoreError};

fn make_order(id: &str) -> Order {
    Order::new(
        OrderId::new(id),
        CreateOrder::new("cust-1", "rest-1", ["burger"]),
        Utc::now(),
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_saves_are_all_visible() {
    let store = InMemoryOrderStore::new();

    let handles: Vec<_> = (0..16)
        .map(|task| {
            let store = store.clone();
            tokio::spawn(async move {
                for i in 0..50 {
                    store.save(make_order(&format!("ORD-{task}-{i}"))).await;
                }
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.len().await, 16 * 50);
    assert_eq!(store.get_all().await.len(), 16 * 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn readers_see_whole_records_while_writers_update() {
    let store = Arc::new(InMemoryOrderStore::new());
    let ids: Vec<OrderId> = (0..20).map(|i| OrderId::new(format!("ORD-{i}"))).collect();
    for id in &ids {
        store.save(make_order(id.as_str())).await;
    }

    let writer = {
        let store = Arc::clone(&store);
        let ids = ids.clone();
        tokio::spawn(async move {
            for status in [OrderStatus::Processing, OrderStatus::Completed] {
                for id in &ids {
                    store.update_status(id, status).await.unwrap();
                    tokio::task::yield_now().await;
                }
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                for _ in 0..200 {
                    for order in store.get_all().await {
                        assert!(order.updated_at >= order.created_at);
                        assert_eq!(order.items.len(), 1);
                    }
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }

    for id in &ids {
        assert_eq!(store.get(id).await.unwrap().status, OrderStatus::Completed);
    }
}

#[tokio::test]
async fn not_found_carries_the_requested_id() {
    let store = InMemoryOrderStore::new();
    let id = OrderId::new("ORD-missing");

    let err = store
        .update_status(&id, OrderStatus::Failed)
        .await
        .unwrap_err();
    assert_eq!(err.order_id(), &id);
    assert_eq!(err, StoreError::NotFound(id));
}
