use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every timer state change produces an Event.
/// The presentation layer renders them; listeners subscribe to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        phase: Phase,
        total_secs: u32,
        at: DateTime<Utc>,
    },
    /// A focus session ran to zero. Fired once per Focus -> Break rollover.
    SessionCompleted {
        focus_minutes: u32,
        at: DateTime<Utc>,
    },
    /// A break ran to zero and the engine is back in Focus.
    BreakCompleted {
        at: DateTime<Utc>,
    },
    /// Focus length changed. `applied` is false while the new value waits
    /// for the next focus entry.
    FocusMinutesChanged {
        minutes: u32,
        applied: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// True for the two rollover events, after which the engine is paused
    /// at the start of a new phase.
    pub fn is_phase_boundary(&self) -> bool {
        matches!(
            self,
            Event::SessionCompleted { .. } | Event::BreakCompleted { .. }
        )
    }
}
