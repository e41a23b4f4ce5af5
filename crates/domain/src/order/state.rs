//! Order status machine.

use serde::{Deserialize, Serialize};

/// The status of an order in its processing lifecycle.
///
/// Status transitions:
/// ```text
/// Pending ──► Processing ──┬──► Completed
///                          └──► Failed
/// ```
///
/// Only the worker that dequeued an order drives its transitions; the store
/// accepts any status it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order has been recorded and is waiting in the queue.
    #[default]
    Pending,

    /// A worker has picked the order up and is running the processing stage.
    Processing,

    /// Processing succeeded (terminal state).
    Completed,

    /// Processing failed (terminal state).
    Failed,
}

impl OrderStatus {
    /// Returns true if a worker may move the order into `Processing`.
    pub fn can_start_processing(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Returns true if the order may move into a terminal status.
    pub fn can_finish(&self) -> bool {
        matches!(self, OrderStatus::Processing)
    }

    /// Returns true if this is a terminal status (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Failed)
    }

    /// Returns true if moving from `self` to `next` is a legal forward step.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match next {
            OrderStatus::Pending => false,
            OrderStatus::Processing => self.can_start_processing(),
            OrderStatus::Completed | OrderStatus::Failed => self.can_finish(),
        }
    }

    /// Returns the status name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
