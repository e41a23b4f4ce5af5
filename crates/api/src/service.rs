//! Ingestion service: turns creation requests into stored, queued orders.

use std::sync::Arc;

use chrono::Utc;
use common::{IdGenerator, OrderId};
use domain::{CreateOrder, Order, OrderError};
use order_store::{OrderStore, StoreError};
use thiserror::Error;
use worker::{WorkerError, WorkerPool};

/// Errors returned by the ingestion service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The creation request was malformed.
    #[error(transparent)]
    Validation(#[from] OrderError),

    /// Order store error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Worker pool error.
    #[error(transparent)]
    Worker(#[from] WorkerError),
}

/// Service for creating and querying orders.
///
/// Creation validates the request, mints an ID, saves the order as `Pending`
/// and hands its ID to the worker pool. Queries read straight from the store.
pub struct OrderService<S: OrderStore> {
    store: S,
    pool: Arc<WorkerPool<S>>,
    ids: Arc<dyn IdGenerator>,
}

impl<S: OrderStore + Clone + 'static> OrderService<S> {
    /// Creates a new order service.
    pub fn new(store: S, pool: Arc<WorkerPool<S>>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, pool, ids }
    }

    /// Returns the worker pool orders are submitted to.
    pub fn pool(&self) -> &Arc<WorkerPool<S>> {
        &self.pool
    }

    /// Creates a new order and queues it for processing.
    ///
    /// Returns the order as it was first stored, in `Pending` status. Waits
    /// while the worker queue is full. The queue slot is taken before the
    /// order is saved: a closed pool rejects the request with nothing stored,
    /// and once saved the order is always processed.
    #[tracing::instrument(skip(self, cmd), fields(customer_id = %cmd.customer_id))]
    pub async fn create_order(&self, cmd: CreateOrder) -> Result<Order, ServiceError> {
        cmd.validate()?;
        let slot = self.pool.reserve().await?;

        let order = Order::new(self.ids.next_id(), cmd, Utc::now());
        self.store.save(order.clone()).await;
        slot.send(order.id.clone());

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = %order.id, items = order.item_count(), "order created");

        Ok(order)
    }

    /// Loads an order by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, ServiceError> {
        Ok(self.store.get(id).await?)
    }

    /// Lists every stored order.
    pub async fn get_all_orders(&self) -> Vec<Order> {
        self.store.get_all().await
    }

    /// Returns how many orders are stored.
    pub async fn count_orders(&self) -> usize {
        self.store.count().await
    }
}
