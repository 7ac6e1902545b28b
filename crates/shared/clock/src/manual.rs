use chrono::{Duration, Utc};
use counter_core::Timestamp;
use counter_ports::Clock;
use std::sync::RwLock;

/// Wall clock that only moves when told to
///
/// Used where published timestamps must be reproducible.
pub struct ManualClock {
    current_time: RwLock<Timestamp>,
}

impl ManualClock {
    /// Create a clock frozen at `initial_time`, or at the current wall time
    pub fn new(initial_time: Option<Timestamp>) -> Self {
        Self {
            current_time: RwLock::new(initial_time.unwrap_or_else(Utc::now)),
        }
    }

    /// Advance the clock by `duration`
    pub fn advance(&self, duration: Duration) {
        let mut current = self
            .current_time
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current += duration;
    }

    /// Explicitly set the time
    pub fn set_time(&self, time: Timestamp) {
        let mut current = self
            .current_time
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = time;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self
            .current_time
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_frozen() {
        let clock = ManualClock::new(None);
        let time1 = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let time2 = clock.now();

        assert_eq!(time1, time2);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(None);
        let start = clock.now();

        clock.advance(Duration::seconds(5));
        assert_eq!(clock.now() - start, Duration::seconds(5));

        clock.set_time(start);
        assert_eq!(clock.now(), start);
    }
}
