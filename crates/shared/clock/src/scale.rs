use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Time scale modes for the tick clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeScale {
    /// Real-time: one tick per configured interval
    #[default]
    Normal,
    /// Accelerated: the interval is divided by the multiplier
    Fast(u32),
    /// Decelerated: the interval is multiplied by the divisor
    Slow(u32),
    /// No autonomous ticks; time only moves when stepped explicitly
    Fixed,
}

impl TimeScale {
    /// Real period between ticks for a nominal `interval`
    ///
    /// Returns None for [`TimeScale::Fixed`]. A zero multiplier or divisor
    /// is treated as 1.
    pub fn real_period(&self, interval: Duration) -> Option<Duration> {
        match *self {
            TimeScale::Normal => Some(interval),
            TimeScale::Fast(multiplier) => Some(interval / multiplier.max(1)),
            TimeScale::Slow(divisor) => Some(interval.saturating_mul(divisor.max(1))),
            TimeScale::Fixed => None,
        }
    }
}
