use counter_core::Timestamp;

/// Port for wall-clock time
///
/// This allows the system to use different time sources:
/// - Real system time for production
/// - Fixed, manually advanced time for deterministic tests
///
/// Tick counting is separate; see [`TickSource`](crate::TickSource).
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> Timestamp;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
