//! Order processing worker pool.
//!
//! This crate moves orders from `Pending` to a terminal status:
//! - [`WorkerPool`] owns a bounded queue of order IDs and a fixed set of
//!   worker tasks draining it
//! - [`ProcessingStage`] is the pluggable, possibly failing work done per order
//! - [`FulfillmentStage`] chains simulated restaurant, payment, and courier
//!   services into a stage
//!
//! Each order ID is dequeued by exactly one worker, which is what keeps an
//! order's status transitions in order without per-order locks.

pub mod error;
pub mod fulfillment;
pub mod pool;
pub mod services;
pub mod stage;

pub use error::{ProcessingError, Result, WorkerError};
pub use fulfillment::{FulfillmentStage, SimulatedLatency};
pub use pool::{PoolConfig, ProcessOutcome, QueueSlot, WorkerPool};
pub use services::{
    ConfirmationResult, CourierAssignment, CourierService, InMemoryCourierService,
    InMemoryPaymentService, InMemoryRestaurantService, PaymentResult, PaymentService,
    RestaurantService,
};
pub use stage::{FnStage, ProcessingStage};
