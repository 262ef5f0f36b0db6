//! Integration tests for the async timer service.
//!
//! All tests run on tokio's paused clock, so minutes of timer time pass
//! instantly and deterministically.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use foco_core::timer::IntervalTicker;
use foco_core::{
    Event, IntervalSource, Phase, SessionListener, TickSource, Ticker, TimerEngine, TimerService,
};
use tokio::sync::mpsc;
use tokio::time::sleep;

/// Interval source that tracks how many tickers are alive.
#[derive(Clone, Default)]
struct CountingSource {
    live: Arc<AtomicUsize>,
    acquired: Arc<AtomicUsize>,
}

impl CountingSource {
    fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }
}

struct CountingTicker {
    inner: IntervalTicker,
    live: Arc<AtomicUsize>,
}

impl TickSource for CountingSource {
    type Ticker = CountingTicker;

    fn acquire(&mut self) -> CountingTicker {
        self.live.fetch_add(1, Ordering::SeqCst);
        self.acquired.fetch_add(1, Ordering::SeqCst);
        CountingTicker {
            inner: IntervalSource::default().acquire(),
            live: Arc::clone(&self.live),
        }
    }
}

impl Ticker for CountingTicker {
    fn tick(&mut self) -> impl Future<Output = ()> + Send {
        self.inner.tick()
    }
}

impl Drop for CountingTicker {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Listener that only counts session completions.
#[derive(Clone, Default)]
struct SessionCounter(Arc<AtomicUsize>);

impl SessionListener for SessionCounter {
    fn session_completed(&mut self, _focus_minutes: u32) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn drain(rx: &mut mpsc::UnboundedReceiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test(start_paused = true)]
async fn start_counts_down_once_per_second() {
    let handle = TimerService::spawn(TimerEngine::new(1), IntervalSource::default(), ());

    let snap = handle.start().await.unwrap();
    assert!(snap.is_running);
    assert_eq!(snap.remaining_secs, 60);

    sleep(Duration::from_millis(10_500)).await;
    let snap = handle.snapshot().await.unwrap();
    assert_eq!(snap.remaining_secs, 50);
    assert!(snap.is_running);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn ticker_lives_exactly_while_running() {
    let source = CountingSource::default();
    let handle = TimerService::spawn(TimerEngine::new(25), source.clone(), ());
    assert_eq!(source.live(), 0);

    handle.start().await.unwrap();
    assert_eq!(source.live(), 1);

    // A second start must not stack another ticker.
    handle.start().await.unwrap();
    assert_eq!(source.acquired(), 1);

    sleep(Duration::from_millis(3_500)).await;
    let paused = handle.pause().await.unwrap();
    assert_eq!(source.live(), 0);
    assert_eq!(paused.remaining_secs, 1500 - 3);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(handle.snapshot().await.unwrap().remaining_secs, 1500 - 3);

    handle.toggle().await.unwrap();
    assert_eq!(source.live(), 1);
    handle.reset().await.unwrap();
    assert_eq!(source.live(), 0);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn one_minute_session_end_to_end() {
    let source = CountingSource::default();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = TimerService::spawn(TimerEngine::new(1), source.clone(), tx);

    handle.start().await.unwrap();
    sleep(Duration::from_millis(59_500)).await;

    let snap = handle.snapshot().await.unwrap();
    assert_eq!(snap.remaining_secs, 1);
    assert!(snap.is_running);
    let events = drain(&mut rx);
    assert!(matches!(events.as_slice(), [Event::TimerStarted { .. }]));

    sleep(Duration::from_secs(1)).await;
    let snap = handle.snapshot().await.unwrap();
    assert_eq!(snap.phase, Phase::Break);
    assert_eq!(snap.remaining_secs, 300);
    assert_eq!(snap.total_secs, 300);
    assert!(!snap.is_running);
    assert_eq!(source.live(), 0);

    let events = drain(&mut rx);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Event::SessionCompleted { focus_minutes: 1, .. }));

    // The break waits for an explicit start.
    sleep(Duration::from_secs(10)).await;
    assert_eq!(handle.snapshot().await.unwrap().remaining_secs, 300);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn session_signal_fires_only_on_focus_to_break() {
    let counter = SessionCounter::default();
    let handle = TimerService::spawn(
        TimerEngine::new(1),
        IntervalSource::default(),
        counter.clone(),
    );

    handle.start().await.unwrap();
    sleep(Duration::from_millis(60_500)).await;
    assert_eq!(counter.0.load(Ordering::SeqCst), 1);

    handle.start().await.unwrap();
    sleep(Duration::from_millis(300_500)).await;
    let snap = handle.snapshot().await.unwrap();
    assert_eq!(snap.phase, Phase::Focus);
    assert!(!snap.is_running);
    assert_eq!(counter.0.load(Ordering::SeqCst), 1);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn focus_length_change_waits_for_next_focus() {
    let handle = TimerService::spawn(TimerEngine::new(1), IntervalSource::default(), ());

    handle.start().await.unwrap();
    sleep(Duration::from_millis(5_500)).await;

    let snap = handle.set_focus_minutes(50).await.unwrap();
    assert_eq!(snap.total_secs, 60);
    assert_eq!(snap.remaining_secs, 55);
    assert_eq!(snap.focus_minutes, 50);

    sleep(Duration::from_secs(55)).await;
    assert_eq!(handle.snapshot().await.unwrap().phase, Phase::Break);

    handle.start().await.unwrap();
    sleep(Duration::from_millis(300_500)).await;
    let snap = handle.snapshot().await.unwrap();
    assert_eq!(snap.phase, Phase::Focus);
    assert_eq!(snap.total_secs, 3000);
    assert_eq!(snap.remaining_secs, 3000);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn teardown_releases_ticker() {
    let source = CountingSource::default();
    let handle = TimerService::spawn(TimerEngine::new(25), source.clone(), ());
    handle.start().await.unwrap();
    assert_eq!(source.live(), 1);
    handle.shutdown().await.unwrap();
    assert_eq!(source.live(), 0);

    let handle = TimerService::spawn(TimerEngine::new(25), source.clone(), ());
    handle.start().await.unwrap();
    assert_eq!(source.live(), 1);
    drop(handle);
    sleep(Duration::from_millis(1)).await;
    assert_eq!(source.live(), 0);
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_every_tick() {
    let handle = TimerService::spawn(TimerEngine::new(1), IntervalSource::default(), ());
    let mut snapshots = handle.subscribe();

    handle.start().await.unwrap();
    let _ = snapshots.borrow_and_update();

    snapshots.changed().await.unwrap();
    assert_eq!(snapshots.borrow_and_update().remaining_secs, 59);
    snapshots.changed().await.unwrap();
    assert_eq!(snapshots.borrow_and_update().remaining_secs, 58);
    assert_eq!(handle.latest().remaining_secs, 58);

    handle.shutdown().await.unwrap();
}
