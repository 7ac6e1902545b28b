//! Counter Clock Infrastructure
//!
//! Provides the two kinds of time the simulation needs:
//!
//! - **Wall time** ([`Clock`]): stamps published updates. [`SystemClock`] in
//!   production, [`ManualClock`] for deterministic tests.
//! - **Ticks** ([`TickSource`]): drive the engine countdown. [`IntervalTicker`]
//!   fires on a tokio interval scaled by a [`TimeScale`]; [`ManualTicker`]
//!   never fires and leaves stepping to the caller.
//!
//! ## Usage
//!
//! ```ignore
//! use counter_clock::{IntervalTicker, TickSource, TimeScale};
//! use std::time::Duration;
//!
//! // One tick per second of wall time
//! let mut ticker = IntervalTicker::new(Duration::from_secs(1), TimeScale::Normal);
//!
//! // Ten ticks per second
//! let mut fast = IntervalTicker::new(Duration::from_secs(1), TimeScale::Fast(10));
//!
//! ticker.next_tick().await;
//! ```

mod manual;
mod scale;
mod system;
mod ticker;

pub use manual::ManualClock;
pub use scale::TimeScale;
pub use system::SystemClock;
pub use ticker::{IntervalTicker, ManualTicker, ticker_for};

// Re-export the ports for convenience
pub use counter_ports::{Clock, TickSource};
