//! Counter Ports
//!
//! Port definitions (traits) for the order counter simulation.
//! These define the boundaries between the dispatch engine and the
//! infrastructure that drives it.

mod clock;
mod error;
mod removal;
mod tick;

pub use clock::Clock;
pub use error::{InvariantResult, InvariantViolation};
pub use removal::RemovalPolicy;
pub use tick::TickSource;
