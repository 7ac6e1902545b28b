use async_trait::async_trait;
use std::time::Duration;

/// Port for whatever triggers engine ticks
///
/// The engine's tick semantics do not depend on the trigger: a real timer,
/// a paused test runtime, or a source that never fires and leaves stepping
/// to the caller all look the same from here.
#[async_trait]
pub trait TickSource: Send {
    /// Wait until the next tick is due
    async fn next_tick(&mut self);

    /// Real time between ticks, or None if this source never fires on its own
    fn period(&self) -> Option<Duration>;
}
