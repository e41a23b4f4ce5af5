//! Payment service trait and in-memory implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use domain::Order;

use super::simulate_latency;
use crate::error::ProcessingError;

/// Result of a successful payment charge.
#[derive(Debug, Clone)]
pub struct PaymentResult {
    /// The payment ID assigned by the payment service.
    pub payment_id: String,
}

/// Trait for payment processing operations.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Charges the customer for an order.
    async fn charge(&self, order: &Order) -> Result<PaymentResult, ProcessingError>;
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    charged: AtomicU32,
    fail_on_charge: AtomicBool,
}

/// In-memory payment service.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentService {
    state: Arc<InMemoryPaymentState>,
    latency: Duration,
}

impl InMemoryPaymentService {
    /// Creates a payment service that answers immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a payment service that takes `latency` per charge.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// Configures the service to decline every charge.
    pub fn set_fail_on_charge(&self, fail: bool) {
        self.state.fail_on_charge.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of successful charges.
    pub fn payment_count(&self) -> u32 {
        self.state.charged.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentService for InMemoryPaymentService {
    async fn charge(&self, order: &Order) -> Result<PaymentResult, ProcessingError> {
        simulate_latency(self.latency).await;

        if self.state.fail_on_charge.load(Ordering::SeqCst) {
            return Err(ProcessingError::Payment(format!(
                "payment declined for customer {}",
                order.customer_id
            )));
        }

        let n = self.state.charged.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(PaymentResult {
            payment_id: format!("PAY-{n:04}"),
        })
    }
}
