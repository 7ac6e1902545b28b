//! Counter Core Domain
//!
//! Pure domain types for the order counter simulation.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Bot, BotState, BotStatus, Order, OrderStatus, Priority};
pub use values::{BotId, DEFAULT_PROCESSING_DURATION, OrderId, Tick, Timestamp};
