mod engine;
mod phase;
mod service;
mod ticker;

pub use engine::{TimerEngine, TimerSnapshot};
pub use phase::{format_clock, Phase, BREAK_MINUTES, DEFAULT_FOCUS_MINUTES};
pub use service::{SessionListener, TimerHandle, TimerService};
pub use ticker::{IntervalSource, IntervalTicker, TickSource, Ticker, DEFAULT_TICK_PERIOD};
