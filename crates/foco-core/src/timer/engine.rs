//! Timer engine implementation.
//!
//! The engine is a tick-driven countdown state machine. It owns no clock and
//! no threads - the owner calls `tick()` once per second while the engine is
//! running (see [`crate::timer::TimerService`]).
//!
//! ## State Transitions
//!
//! ```text
//! (Focus,Paused)  --start-->  (Focus,Running)
//! (Focus,Running) --pause-->  (Focus,Paused)
//! (Focus,Running) --tick at 1s--> SessionCompleted, (Break,Paused)
//! (Break,Paused)  --start-->  (Break,Running)
//! (Break,Running) --pause-->  (Break,Paused)
//! (Break,Running) --tick at 1s--> BreakCompleted, (Focus,Paused)
//! any             --reset-->  same phase, Paused, remaining = total
//! ```
//!
//! ## Usage
//!
//! ```
//! use foco_core::{Event, TimerEngine};
//!
//! let mut engine = TimerEngine::new(1);
//! engine.start();
//! for _ in 0..59 {
//!     assert!(engine.tick().is_none());
//! }
//! assert!(matches!(engine.tick(), Some(Event::SessionCompleted { .. })));
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::phase::{format_clock, Phase, DEFAULT_FOCUS_MINUTES};
use crate::events::Event;

/// Read-only view of the engine, available after every operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub remaining_secs: u32,
    pub total_secs: u32,
    pub is_running: bool,
    /// 0.0 ..= 100.0 progress within the current phase.
    pub progress: f64,
    /// Most recently configured focus length, applied or not.
    pub focus_minutes: u32,
}

impl TimerSnapshot {
    /// Remaining time as `MM:SS`.
    pub fn clock(&self) -> String {
        format_clock(self.remaining_secs)
    }
}

/// Core timer engine.
///
/// `total_secs` is never stored: it is always derived from `phase` and the
/// applied focus length, so it cannot drift from its definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEngine {
    phase: Phase,
    remaining_secs: u32,
    running: bool,
    /// Focus length in effect for the current (or next) focus phase.
    focus_minutes: u32,
    /// Focus length requested while it could not be applied yet.
    pending_focus_minutes: Option<u32>,
}

impl TimerEngine {
    /// Create a paused engine at the start of a focus phase.
    ///
    /// A focus length of zero is raised to one minute.
    pub fn new(focus_minutes: u32) -> Self {
        let focus_minutes = if focus_minutes == 0 {
            warn!("focus length of 0 minutes raised to 1");
            1
        } else {
            focus_minutes
        };
        Self {
            phase: Phase::Focus,
            remaining_secs: Phase::Focus.duration_secs(focus_minutes),
            running: false,
            focus_minutes,
            pending_focus_minutes: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.phase.duration_secs(self.focus_minutes)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Latest configured focus length, including one still waiting to apply.
    pub fn focus_minutes(&self) -> u32 {
        self.pending_focus_minutes.unwrap_or(self.focus_minutes)
    }

    /// Focus length that governs the current or next focus phase.
    pub fn applied_focus_minutes(&self) -> u32 {
        self.focus_minutes
    }

    pub fn has_pending_focus_minutes(&self) -> bool {
        self.pending_focus_minutes.is_some()
    }

    /// 0.0 ..= 100.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.remaining_secs);
        (f64::from(elapsed) / f64::from(total) * 100.0).clamp(0.0, 100.0)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            is_running: self.running,
            progress: self.progress(),
            focus_minutes: self.focus_minutes(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.running || self.remaining_secs == 0 {
            return None;
        }
        self.running = true;
        debug!(phase = %self.phase, remaining = self.remaining_secs, "timer started");
        Some(Event::TimerStarted {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        // A waiting focus length lands at the first paused focus point.
        if self.phase == Phase::Focus {
            self.apply_pending_focus_minutes();
        }
        debug!(phase = %self.phase, remaining = self.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Stop and rewind the current phase. The phase itself is kept.
    pub fn reset(&mut self) -> Option<Event> {
        self.running = false;
        if self.phase == Phase::Focus {
            self.apply_pending_focus_minutes();
        }
        self.remaining_secs = self.total_secs();
        debug!(phase = %self.phase, total = self.remaining_secs, "timer reset");
        Some(Event::TimerReset {
            phase: self.phase,
            total_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Change the focus length.
    ///
    /// Applied immediately when paused in Focus; otherwise held until the
    /// next paused focus entry. Zero is ignored.
    pub fn set_focus_minutes(&mut self, minutes: u32) -> Option<Event> {
        if minutes == 0 {
            warn!("ignoring focus length of 0 minutes");
            return None;
        }

        let applied = !self.running && self.phase == Phase::Focus;
        if applied {
            self.focus_minutes = minutes;
            self.pending_focus_minutes = None;
            self.remaining_secs = self.total_secs();
        } else if minutes == self.focus_minutes {
            self.pending_focus_minutes = None;
        } else {
            self.pending_focus_minutes = Some(minutes);
        }

        debug!(minutes, applied, "focus length changed");
        Some(Event::FocusMinutesChanged {
            minutes,
            applied,
            at: Utc::now(),
        })
    }

    /// Advance one second. Returns the rollover event when a phase ends.
    ///
    /// Inert while paused: a tick racing a pause must not move time.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        if self.remaining_secs <= 1 {
            return Some(self.roll_over());
        }
        self.remaining_secs -= 1;
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn roll_over(&mut self) -> Event {
        self.running = false;
        let finished = self.phase;
        let focus_minutes = self.focus_minutes;
        self.phase = finished.next();
        if self.phase == Phase::Focus {
            self.apply_pending_focus_minutes();
        }
        self.remaining_secs = self.total_secs();
        match finished {
            Phase::Focus => {
                info!(focus_minutes, "focus session completed");
                Event::SessionCompleted {
                    focus_minutes,
                    at: Utc::now(),
                }
            }
            Phase::Break => {
                info!(focus_minutes = self.focus_minutes, "break completed");
                Event::BreakCompleted { at: Utc::now() }
            }
        }
    }

    fn apply_pending_focus_minutes(&mut self) {
        if let Some(minutes) = self.pending_focus_minutes.take() {
            debug!(minutes, "applying deferred focus length");
            self.focus_minutes = minutes;
            if self.phase == Phase::Focus {
                self.remaining_secs = self.total_secs();
            }
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_MINUTES)
    }
}
