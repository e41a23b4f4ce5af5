//! Restaurant confirmation service trait and in-memory implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use domain::Order;

use super::simulate_latency;
use crate::error::ProcessingError;

/// Result of a successful restaurant confirmation.
#[derive(Debug, Clone)]
pub struct ConfirmationResult {
    /// The confirmation ID assigned by the restaurant.
    pub confirmation_id: String,
}

/// Trait for confirming an order with its restaurant.
#[async_trait]
pub trait RestaurantService: Send + Sync {
    /// Asks the restaurant to accept the order.
    async fn confirm(&self, order: &Order) -> Result<ConfirmationResult, ProcessingError>;
}

#[derive(Debug, Default)]
struct InMemoryRestaurantState {
    confirmed: AtomicU32,
    fail_on_confirm: AtomicBool,
}

/// In-memory restaurant service.
///
/// Confirmation takes one latency unit, plus one more for an odd number of
/// items, mimicking a kitchen that needs longer for some orders.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRestaurantService {
    state: Arc<InMemoryRestaurantState>,
    latency_unit: Duration,
}

impl InMemoryRestaurantService {
    /// Creates a restaurant service that answers immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a restaurant service with the given latency unit.
    pub fn with_latency(latency_unit: Duration) -> Self {
        Self {
            latency_unit,
            ..Self::default()
        }
    }

    /// Configures the service to reject every confirmation.
    pub fn set_fail_on_confirm(&self, fail: bool) {
        self.state.fail_on_confirm.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of confirmed orders.
    pub fn confirmed_count(&self) -> u32 {
        self.state.confirmed.load(Ordering::SeqCst)
    }

    fn latency_for(&self, order: &Order) -> Duration {
        let units = 1 + (order.item_count() % 2) as u32;
        self.latency_unit * units
    }
}

#[async_trait]
impl RestaurantService for InMemoryRestaurantService {
    async fn confirm(&self, order: &Order) -> Result<ConfirmationResult, ProcessingError> {
        simulate_latency(self.latency_for(order)).await;

        if self.state.fail_on_confirm.load(Ordering::SeqCst) {
            return Err(ProcessingError::Restaurant(format!(
                "{} declined the order",
                order.restaurant_id
            )));
        }

        let n = self.state.confirmed.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ConfirmationResult {
            confirmation_id: format!("CONF-{n:04}"),
        })
    }
}
