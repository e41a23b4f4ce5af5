//! Order fulfillment stage: restaurant confirmation, payment, courier.

use std::time::Duration;

use async_trait::async_trait;
use domain::Order;

use crate::error::ProcessingError;
use crate::services::{
    CourierService, InMemoryCourierService, InMemoryPaymentService, InMemoryRestaurantService,
    PaymentService, RestaurantService,
};
use crate::stage::ProcessingStage;

/// Time scale for the simulated fulfillment services.
///
/// One unit is the base latency: restaurant confirmation takes one or two
/// units, payment half a unit, and courier assignment one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    unit: Duration,
}

impl SimulatedLatency {
    pub fn new(unit: Duration) -> Self {
        Self { unit }
    }

    /// No simulated delay at all.
    pub fn none() -> Self {
        Self {
            unit: Duration::ZERO,
        }
    }

    pub fn unit(&self) -> Duration {
        self.unit
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

/// Runs an order through restaurant confirmation, payment, and courier
/// assignment, stopping at the first step that fails.
pub struct FulfillmentStage<R, P, C>
where
    R: RestaurantService,
    P: PaymentService,
    C: CourierService,
{
    restaurant: R,
    payment: P,
    courier: C,
}

impl<R, P, C> FulfillmentStage<R, P, C>
where
    R: RestaurantService,
    P: PaymentService,
    C: CourierService,
{
    /// Creates a fulfillment stage from its three services.
    pub fn new(restaurant: R, payment: P, courier: C) -> Self {
        Self {
            restaurant,
            payment,
            courier,
        }
    }
}

impl FulfillmentStage<InMemoryRestaurantService, InMemoryPaymentService, InMemoryCourierService> {
    /// Wires the in-memory services with the given latency scale.
    pub fn simulated(latency: SimulatedLatency) -> Self {
        let unit = latency.unit();
        Self::new(
            InMemoryRestaurantService::with_latency(unit),
            InMemoryPaymentService::with_latency(unit / 2),
            InMemoryCourierService::with_latency(unit),
        )
    }
}

#[async_trait]
impl<R, P, C> ProcessingStage for FulfillmentStage<R, P, C>
where
    R: RestaurantService,
    P: PaymentService,
    C: CourierService,
{
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id))]
    async fn process(&self, order: &Order) -> Result<(), ProcessingError> {
        let confirmation = self.restaurant.confirm(order).await?;
        tracing::debug!(confirmation_id = %confirmation.confirmation_id, "restaurant confirmed");

        let payment = self.payment.charge(order).await?;
        tracing::debug!(payment_id = %payment.payment_id, "payment charged");

        let assignment = self.courier.assign(order).await?;
        tracing::debug!(courier_id = %assignment.courier_id, "courier assigned");

        Ok(())
    }
}
