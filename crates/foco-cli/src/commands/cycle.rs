//! Unattended focus/break cycles.
//!
//! The engine pauses at every phase boundary; this command plays the part of
//! a user who always presses start again.

use clap::Args;
use foco_core::{Event, IntervalSource, SessionTally, TimerEngine, TimerService};
use tokio::sync::mpsc;
use tracing::info;

use super::{focus_minutes_arg, tick_period};

#[derive(Args)]
pub struct CycleArgs {
    /// Focus length in minutes (1-120)
    #[arg(long, value_parser = focus_minutes_arg)]
    focus_minutes: Option<u32>,
    /// Stop after this many completed focus sessions
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    sessions: u32,
    /// Tick period in milliseconds
    #[arg(long, hide = true)]
    tick_ms: Option<u64>,
}

pub async fn run(
    args: CycleArgs,
    config: &foco_core::Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let focus_minutes = args.focus_minutes.unwrap_or(config.timer.focus_minutes);
    let period = tick_period(args.tick_ms, config);
    info!(focus_minutes, sessions = args.sessions, ?period, "starting cycle");

    let (tx, mut events) = mpsc::unbounded_channel();
    let handle = TimerService::spawn(
        TimerEngine::new(focus_minutes),
        IntervalSource::new(period),
        tx,
    );
    let mut tally = SessionTally::new();

    handle.start().await?;
    while let Some(event) = events.recv().await {
        println!("{}", serde_json::to_string(&event)?);

        if tally.record(&event) && tally.completed() >= args.sessions {
            break;
        }
        if event.is_phase_boundary() {
            handle.start().await?;
        }
    }

    handle.shutdown().await?;
    if let Some(message) = tally.message() {
        eprintln!("{message}");
    }
    Ok(())
}
