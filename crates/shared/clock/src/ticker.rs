use async_trait::async_trait;
use counter_ports::TickSource;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::TimeScale;

/// Tick source backed by a tokio interval
///
/// The first tick fires one full period after creation. Late ticks are
/// delivered back to back so the tick count keeps up with elapsed time.
/// Must be created inside a tokio runtime. A period too long to schedule
/// behaves like [`TimeScale::Fixed`].
pub struct IntervalTicker {
    interval: Option<Interval>,
    period: Option<Duration>,
}

impl IntervalTicker {
    /// Create a ticker for a nominal `interval` under `scale`
    pub fn new(interval: Duration, scale: TimeScale) -> Self {
        let schedule = scale
            .real_period(interval)
            .filter(|p| !p.is_zero())
            .and_then(|p| Some((Instant::now().checked_add(p)?, p)));
        let interval = schedule.map(|(start, period)| {
            let mut interval = interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            interval
        });

        Self {
            interval,
            period: schedule.map(|(_, period)| period),
        }
    }
}

#[async_trait]
impl TickSource for IntervalTicker {
    async fn next_tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }

    fn period(&self) -> Option<Duration> {
        self.period
    }
}

/// Tick source that never fires
///
/// Ticks happen only when the owner steps the engine explicitly.
#[derive(Debug, Default)]
pub struct ManualTicker;

impl ManualTicker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TickSource for ManualTicker {
    async fn next_tick(&mut self) {
        std::future::pending::<()>().await
    }

    fn period(&self) -> Option<Duration> {
        None
    }
}

/// Pick the tick source for a configured interval and time scale
pub fn ticker_for(interval: Duration, scale: TimeScale) -> Box<dyn TickSource> {
    let ticker = IntervalTicker::new(interval, scale);
    match ticker.period() {
        Some(_) => Box::new(ticker),
        None => Box::new(ManualTicker::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_interval_ticker_waits_one_period() {
        let mut ticker = IntervalTicker::new(Duration::from_secs(1), TimeScale::Normal);
        let start = Instant::now();

        ticker.next_tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(1));

        ticker.next_tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_scale_shortens_period() {
        let mut ticker = IntervalTicker::new(Duration::from_secs(1), TimeScale::Fast(4));
        assert_eq!(ticker.period(), Some(Duration::from_millis(250)));

        let start = Instant::now();
        ticker.next_tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_scale_never_fires() {
        let mut ticker = ticker_for(Duration::from_secs(1), TimeScale::Fixed);
        assert_eq!(ticker.period(), None);

        let fired = tokio::time::timeout(Duration::from_secs(60), ticker.next_tick()).await;
        assert!(fired.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unschedulable_period_never_fires() {
        let mut ticker = IntervalTicker::new(Duration::from_millis(u64::MAX), TimeScale::Slow(1000));
        assert_eq!(ticker.period(), None);

        let fired = tokio::time::timeout(Duration::from_secs(60), ticker.next_tick()).await;
        assert!(fired.is_err());
    }

    #[tokio::test]
    async fn test_ticker_for_picks_interval() {
        let ticker = ticker_for(Duration::from_millis(500), TimeScale::Slow(2));
        assert_eq!(ticker.period(), Some(Duration::from_secs(1)));
    }
}
