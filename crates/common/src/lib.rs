//! Shared identifier types for the order processing service.

pub mod id_generator;
pub mod types;

pub use id_generator::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use types::OrderId;
