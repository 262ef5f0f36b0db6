use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::timer::SessionListener;

/// Counts completed focus sessions for the encouragement line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTally {
    completed: u32,
}

impl SessionTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Count `event` if it is a session completion. Returns whether it was.
    pub fn record(&mut self, event: &Event) -> bool {
        if matches!(event, Event::SessionCompleted { .. }) {
            self.completed += 1;
            true
        } else {
            false
        }
    }

    /// Nothing to say until the first session is done.
    pub fn message(&self) -> Option<String> {
        match self.completed {
            0 => None,
            1 => Some("Great work! You completed 1 focus session today.".to_string()),
            n => Some(format!("Great work! You completed {n} focus sessions today.")),
        }
    }
}

impl SessionListener for SessionTally {
    fn session_completed(&mut self, _focus_minutes: u32) {
        self.completed += 1;
    }
}
