//! Counter Runner - drives the dispatch engine in real time
//!
//! ```text
//!   EngineHandle ──commands──┐
//!   EngineHandle ──commands──┼──► EngineService ──updates──► subscribers
//!   TickSource ────ticks─────┘    (owns engine)
//! ```
//!
//! Start one with [`EngineService::spawn`] and talk to it through the
//! returned [`EngineHandle`].

pub mod config;
pub mod error;
pub mod order_feed;
pub mod service;

pub use config::{ConfigError, RunnerConfig};
pub use error::{Result, RunnerError};
pub use order_feed::{OrderFeed, OrderFeedConfig};
pub use service::{EngineHandle, EngineService, EngineUpdate, SimulationResults};
