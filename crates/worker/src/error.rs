//! Worker pool error types.

use order_store::StoreError;
use thiserror::Error;

/// Errors returned by the worker pool API.
///
/// `AlreadyStarted` and `PoolClosed` are misuse of the pool, not runtime
/// conditions to recover from.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The pool configuration is unusable.
    #[error("Invalid worker pool configuration: {0}")]
    InvalidConfig(String),

    /// `start` was called on a pool whose workers are already running.
    #[error("Worker pool has already been started")]
    AlreadyStarted,

    /// An order was submitted after the pool was closed.
    #[error("Worker pool is closed")]
    PoolClosed,

    /// Order store error.
    #[error("Order store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors reported by a processing stage for a single order.
///
/// These never leave the worker loop: the order is marked `Failed` and the
/// error is logged.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// The restaurant did not confirm the order.
    #[error("Restaurant confirmation failed: {0}")]
    Restaurant(String),

    /// The payment was declined.
    #[error("Payment failed: {0}")]
    Payment(String),

    /// No courier could be assigned.
    #[error("Courier assignment failed: {0}")]
    Courier(String),

    /// The stage rejected the order for another reason.
    #[error("Order rejected: {0}")]
    Rejected(String),

    /// The stage panicked while processing the order.
    #[error("Processing panicked: {0}")]
    Panicked(String),

    /// The order disappeared from the store before it could be processed.
    #[error("Order unavailable: {0}")]
    OrderUnavailable(#[from] StoreError),
}

/// Convenience type alias for worker pool results.
pub type Result<T> = std::result::Result<T, WorkerError>;
