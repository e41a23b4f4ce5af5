//! Simulated external services used during order fulfillment.

pub mod courier;
pub mod payment;
pub mod restaurant;

pub use courier::{CourierAssignment, CourierService, InMemoryCourierService};
pub use payment::{InMemoryPaymentService, PaymentResult, PaymentService};
pub use restaurant::{ConfirmationResult, InMemoryRestaurantService, RestaurantService};

use std::time::Duration;

/// Sleeps for the given duration, skipping the timer entirely when it is zero.
pub(crate) async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}
