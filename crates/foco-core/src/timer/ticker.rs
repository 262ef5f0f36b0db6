//! Injectable tick sources.
//!
//! The engine never reads a clock. Its owner acquires a [`Ticker`] from a
//! [`TickSource`] when the engine starts running and drops it when the engine
//! stops, so the lifetime of the ticker is the lifetime of the countdown.

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Nominal tick period.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// A live periodic tick. Dropping it cancels all future ticks.
pub trait Ticker: Send {
    /// Resolves at the next tick.
    fn tick(&mut self) -> impl Future<Output = ()> + Send;
}

/// Hands out tickers on demand.
pub trait TickSource: Send {
    type Ticker: Ticker;

    /// Begin a new periodic tick. The first tick arrives one period later.
    fn acquire(&mut self) -> Self::Ticker;
}

/// Tick source backed by `tokio::time::interval`.
#[derive(Debug, Clone, Copy)]
pub struct IntervalSource {
    period: Duration,
}

impl IntervalSource {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

impl Default for IntervalSource {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD)
    }
}

impl TickSource for IntervalSource {
    type Ticker = IntervalTicker;

    fn acquire(&mut self) -> IntervalTicker {
        // A plain `interval` completes its first tick immediately, which
        // would charge a second the moment the user presses start.
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        IntervalTicker { interval }
    }
}

#[derive(Debug)]
pub struct IntervalTicker {
    interval: Interval,
}

impl Ticker for IntervalTicker {
    fn tick(&mut self) -> impl Future<Output = ()> + Send {
        async move {
            self.interval.tick().await;
        }
    }
}
