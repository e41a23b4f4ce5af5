//! Courier assignment service trait and in-memory implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use domain::Order;

use super::simulate_latency;
use crate::error::ProcessingError;

/// Result of a successful courier assignment.
#[derive(Debug, Clone)]
pub struct CourierAssignment {
    /// The courier picking the order up.
    pub courier_id: String,
}

/// Trait for assigning a courier to an order.
#[async_trait]
pub trait CourierService: Send + Sync {
    /// Finds a courier for the order.
    async fn assign(&self, order: &Order) -> Result<CourierAssignment, ProcessingError>;
}

#[derive(Debug, Default)]
struct InMemoryCourierState {
    assigned: AtomicU32,
    no_couriers: AtomicBool,
}

/// In-memory courier service.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCourierService {
    state: Arc<InMemoryCourierState>,
    latency: Duration,
}

impl InMemoryCourierService {
    /// Creates a courier service that answers immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a courier service that takes `latency` per assignment.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// Configures the service to report that no courier is available.
    pub fn set_no_couriers(&self, unavailable: bool) {
        self.state.no_couriers.store(unavailable, Ordering::SeqCst);
    }

    /// Returns the number of assignments made.
    pub fn assignment_count(&self) -> u32 {
        self.state.assigned.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CourierService for InMemoryCourierService {
    async fn assign(&self, order: &Order) -> Result<CourierAssignment, ProcessingError> {
        simulate_latency(self.latency).await;

        if self.state.no_couriers.load(Ordering::SeqCst) {
            return Err(ProcessingError::Courier(format!(
                "no courier available for order {}",
                order.id
            )));
        }

        let n = self.state.assigned.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(CourierAssignment {
            courier_id: format!("COUR-{n:04}"),
        })
    }
}
