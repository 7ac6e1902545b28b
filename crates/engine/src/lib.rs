//! Counter Engine - Order Dispatch Core
//!
//! Matches a stream of VIP and normal orders against a pool of bots:
//!
//! - **OrderQueue**: priority-ordered order sequence (VIPs ahead of normals, FIFO within a class)
//! - **BotPool**: bot records, their countdowns and the removal hook
//! - **Dispatcher**: greedy pairing of the first idle bot with the first pending order
//! - **SimulationEngine**: the single owner of all of the above; every mutating call
//!   and every tick ends with a dispatch drain
//!
//! ## Flow
//!
//! ```text
//!  submit_order / add_bot / remove_bot           tick
//!              │                                   │
//!              ▼                                   ▼
//!    ┌───────────────────┐             ┌─────────────────────┐
//!    │  OrderQueue /     │             │ BotPool::tick       │
//!    │  BotPool mutation │             │ (batch countdown)   │
//!    └─────────┬─────────┘             └──────────┬──────────┘
//!              │                                   │ completions
//!              └──────────────┬────────────────────┘
//!                             ▼
//!                 ┌───────────────────────┐
//!                 │  Dispatcher::drain    │
//!                 └───────────────────────┘
//! ```
//!
//! The engine is synchronous and single-owner. Drive it from a timer through
//! a single serialization point (see the runner crate) or step it by hand.

pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod events;
pub mod pool;
pub mod queue;
pub mod snapshot;

pub use config::EngineConfig;
pub use dispatcher::{Assignment, Dispatcher};
pub use engine::{Completion, SimulationEngine, TickReport};
pub use error::{EngineError, Result};
pub use events::EngineEvent;
pub use pool::{BotPool, RemovalOutcome};
pub use queue::OrderQueue;
pub use snapshot::{EngineSnapshot, EngineStats};

// Re-export domain types so callers need only this crate
pub use counter_core::{
    Bot, BotId, BotState, BotStatus, Order, OrderId, OrderStatus, Priority, Tick,
};
pub use counter_removal::RemovalPolicyKind;
