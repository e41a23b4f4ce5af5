//! Unique order ID sources.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::OrderId;

/// Prefix shared by every generated order ID.
pub const ORDER_ID_PREFIX: &str = "ORD";

/// A source of unique order identifiers.
///
/// Implementations must never hand out the same ID twice for the lifetime of
/// the generator.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh, unique order ID.
    fn next_id(&self) -> OrderId;
}

/// Generates `ORD-<uuid v4>` identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl UuidIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> OrderId {
        OrderId::new(format!("{ORDER_ID_PREFIX}-{}", Uuid::new_v4()))
    }
}

/// Generates `ORD-0001`, `ORD-0002`, ... from an atomic counter.
///
/// Predictable IDs make tests and demo output easier to read.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> OrderId {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        OrderId::new(format!("{ORDER_ID_PREFIX}-{n:04}"))
    }
}
