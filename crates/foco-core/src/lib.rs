//! # Foco Core Library
//!
//! Business logic for Foco, a focus/break timer widget with a task
//! checklist. The terminal front-end in `foco-cli` is a thin layer over
//! this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven state machine alternating Focus and
//!   Break phases; the caller invokes `tick()` once per second
//! - **Tick sources**: injectable periodic schedulers, tokio-backed by default
//! - **Timer service**: async owner that ties the tick source to the engine's
//!   running state and forwards completions to a listener
//! - **Widget**: task list, focus controls, theme and session tally
//! - **Config**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`TimerService`]: Runs an engine against a [`TickSource`]
//! - [`Widget`]: Presentation state around the timer
//! - [`Config`]: Application configuration

pub mod config;
pub mod error;
pub mod events;
pub mod timer;
pub mod widget;

pub use config::Config;
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use timer::{
    IntervalSource, Phase, SessionListener, TickSource, Ticker, TimerEngine, TimerHandle,
    TimerService, TimerSnapshot,
};
pub use widget::{FocusControls, SessionTally, TaskItem, TaskList, Theme, Widget};
