//! Plain state around the timer: tasks, settings toggles, theme and the
//! completed-session tally. None of it has invariants beyond its own fields.

mod controls;
mod tally;
mod tasks;
mod theme;

pub use controls::{
    check_focus_minutes, parse_focus_minutes, FocusControls, MAX_FOCUS_MINUTES,
    MIN_FOCUS_MINUTES,
};
pub use tally::SessionTally;
pub use tasks::{TaskItem, TaskList};
pub use theme::Theme;

use crate::config::Config;

/// Everything the presentation layer owns besides the timer itself.
#[derive(Debug, Clone, Default)]
pub struct Widget {
    pub tasks: TaskList,
    pub controls: FocusControls,
    pub theme: Theme,
    pub tally: SessionTally,
}

impl Widget {
    pub fn from_config(config: &Config) -> Self {
        Self {
            tasks: TaskList::new(),
            controls: FocusControls {
                distractions_blocked: config.controls.distractions_blocked,
                notifications_muted: config.controls.notifications_muted,
                expanded: false,
            },
            theme: Theme::from_dark_mode(config.ui.dark_mode),
            tally: SessionTally::new(),
        }
    }
}
