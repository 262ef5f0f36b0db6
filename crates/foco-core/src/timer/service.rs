//! Async owner of a [`TimerEngine`].
//!
//! One tokio task holds the engine, a tick source and a session listener.
//! Commands arrive over a queue and are applied one at a time; ticks are only
//! awaited while the engine is running, and the ticker is dropped as soon as
//! the engine stops, so no tick can land after a pause or after teardown.

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::engine::{TimerEngine, TimerSnapshot};
use super::ticker::{TickSource, Ticker};
use crate::error::{CoreError, Result};
use crate::events::Event;

const COMMAND_QUEUE_DEPTH: usize = 32;

/// Receives the timer's outbound signals.
///
/// Called from inside the service task, so implementations must be quick.
pub trait SessionListener: Send {
    /// A focus session ran to zero. Called exactly once per Focus -> Break.
    fn session_completed(&mut self, focus_minutes: u32);

    /// Every event the engine produces, including `SessionCompleted`.
    fn event(&mut self, _event: &Event) {}
}

impl SessionListener for () {
    fn session_completed(&mut self, _focus_minutes: u32) {}
}

/// Forwards every event to a channel, typically read by a UI loop.
impl SessionListener for mpsc::UnboundedSender<Event> {
    fn session_completed(&mut self, _focus_minutes: u32) {}

    fn event(&mut self, event: &Event) {
        // The UI may already be gone during teardown.
        let _ = self.send(event.clone());
    }
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Start,
    Pause,
    Toggle,
    Reset,
    SetFocusMinutes(u32),
    Snapshot,
}

struct Request {
    command: Command,
    reply: oneshot::Sender<TimerSnapshot>,
}

pub struct TimerService<S, L> {
    engine: TimerEngine,
    source: S,
    listener: L,
    requests: mpsc::Receiver<Request>,
    snapshots: watch::Sender<TimerSnapshot>,
}

impl<S, L> TimerService<S, L>
where
    S: TickSource + 'static,
    L: SessionListener + 'static,
{
    /// Move the engine into a new service task. Must be called from within a
    /// tokio runtime.
    pub fn spawn(engine: TimerEngine, source: S, listener: L) -> TimerHandle {
        let (requests_tx, requests) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let (snapshots, snapshots_rx) = watch::channel(engine.snapshot());
        let service = Self {
            engine,
            source,
            listener,
            requests,
            snapshots,
        };
        let task = tokio::spawn(service.run());
        TimerHandle {
            requests: requests_tx,
            snapshots: snapshots_rx,
            task,
        }
    }

    async fn run(mut self) {
        info!("timer service started");
        let mut ticker: Option<S::Ticker> = None;

        loop {
            tokio::select! {
                request = self.requests.recv() => {
                    let Some(Request { command, reply }) = request else {
                        break;
                    };
                    if let Some(event) = self.apply(command) {
                        self.dispatch(&event);
                    }
                    self.sync_ticker(&mut ticker);
                    let snapshot = self.publish();
                    // The caller may have stopped waiting.
                    let _ = reply.send(snapshot);
                }
                () = next_tick(&mut ticker) => {
                    if let Some(event) = self.engine.tick() {
                        self.dispatch(&event);
                    }
                    self.sync_ticker(&mut ticker);
                    self.publish();
                }
            }
        }

        if ticker.take().is_some() {
            debug!("tick source released on shutdown");
        }
        info!("timer service stopped");
    }

    fn apply(&mut self, command: Command) -> Option<Event> {
        match command {
            Command::Start => self.engine.start(),
            Command::Pause => self.engine.pause(),
            Command::Toggle => self.engine.toggle(),
            Command::Reset => self.engine.reset(),
            Command::SetFocusMinutes(minutes) => self.engine.set_focus_minutes(minutes),
            Command::Snapshot => None,
        }
    }

    fn dispatch(&mut self, event: &Event) {
        self.listener.event(event);
        if let Event::SessionCompleted { focus_minutes, .. } = event {
            self.listener.session_completed(*focus_minutes);
        }
    }

    /// Hold a ticker exactly while the engine is running.
    fn sync_ticker(&mut self, ticker: &mut Option<S::Ticker>) {
        match (self.engine.is_running(), ticker.is_some()) {
            (true, false) => {
                *ticker = Some(self.source.acquire());
                debug!("tick source acquired");
            }
            (false, true) => {
                *ticker = None;
                debug!("tick source released");
            }
            _ => {}
        }
    }

    fn publish(&self) -> TimerSnapshot {
        let snapshot = self.engine.snapshot();
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }
}

async fn next_tick<T: Ticker>(ticker: &mut Option<T>) {
    match ticker {
        Some(ticker) => ticker.tick().await,
        None => std::future::pending().await,
    }
}

/// Caller side of a running [`TimerService`].
///
/// Every command resolves to the snapshot taken right after it was applied.
/// Dropping the handle stops the service and its ticker.
pub struct TimerHandle {
    requests: mpsc::Sender<Request>,
    snapshots: watch::Receiver<TimerSnapshot>,
    task: JoinHandle<()>,
}

impl TimerHandle {
    pub async fn start(&self) -> Result<TimerSnapshot> {
        self.request(Command::Start).await
    }

    pub async fn pause(&self) -> Result<TimerSnapshot> {
        self.request(Command::Pause).await
    }

    pub async fn toggle(&self) -> Result<TimerSnapshot> {
        self.request(Command::Toggle).await
    }

    pub async fn reset(&self) -> Result<TimerSnapshot> {
        self.request(Command::Reset).await
    }

    pub async fn set_focus_minutes(&self, minutes: u32) -> Result<TimerSnapshot> {
        self.request(Command::SetFocusMinutes(minutes)).await
    }

    /// Snapshot taken after every command and tick queued before this call.
    pub async fn snapshot(&self) -> Result<TimerSnapshot> {
        self.request(Command::Snapshot).await
    }

    /// Last published snapshot, without waiting for the service.
    pub fn latest(&self) -> TimerSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshots.clone()
    }

    /// Close the command queue and wait for the service task to finish.
    pub async fn shutdown(self) -> Result<()> {
        let TimerHandle { requests, task, .. } = self;
        drop(requests);
        task.await.map_err(|_| CoreError::ServiceStopped)
    }

    async fn request(&self, command: Command) -> Result<TimerSnapshot> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request { command, reply })
            .await
            .map_err(|_| CoreError::ServiceStopped)?;
        response.await.map_err(|_| CoreError::ServiceStopped)
    }
}
