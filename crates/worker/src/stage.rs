//! The pluggable per-order processing step.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use domain::Order;

use crate::error::ProcessingError;

/// Work performed on one order between `Processing` and its terminal status.
///
/// The pool does not care what a stage does. It only expects that a call may
/// take a while and may fail; a failure marks the order `Failed`. Each order
/// is processed by a single call, with no retry.
#[async_trait]
pub trait ProcessingStage: Send + Sync {
    /// Processes one order.
    async fn process(&self, order: &Order) -> Result<(), ProcessingError>;
}

#[async_trait]
impl<T: ProcessingStage + ?Sized> ProcessingStage for Arc<T> {
    async fn process(&self, order: &Order) -> Result<(), ProcessingError> {
        (**self).process(order).await
    }
}

/// Adapts an async closure into a [`ProcessingStage`].
///
/// ```ignore
/// let stage = FnStage::new(|order: Order| async move {
///     if order.items.len() > 10 {
///         return Err(ProcessingError::Rejected("too many items".into()));
///     }
///     Ok(())
/// });
/// ```
pub struct FnStage<F> {
    f: F,
}

impl<F> FnStage<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> ProcessingStage for FnStage<F>
where
    F: Fn(Order) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), ProcessingError>> + Send,
{
    async fn process(&self, order: &Order) -> Result<(), ProcessingError> {
        (self.f)(order.clone()).await
    }
}
