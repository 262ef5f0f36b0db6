//! Settings panel: distraction toggles and the focus-length input.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_FOCUS_MINUTES: u32 = 1;
pub const MAX_FOCUS_MINUTES: u32 = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusControls {
    pub distractions_blocked: bool,
    pub notifications_muted: bool,
    /// Whether the settings panel is open.
    pub expanded: bool,
}

impl Default for FocusControls {
    fn default() -> Self {
        Self {
            distractions_blocked: false,
            notifications_muted: true,
            expanded: false,
        }
    }
}

impl FocusControls {
    pub fn toggle_distractions(&mut self) -> bool {
        self.distractions_blocked = !self.distractions_blocked;
        self.distractions_blocked
    }

    pub fn toggle_notifications(&mut self) -> bool {
        self.notifications_muted = !self.notifications_muted;
        self.notifications_muted
    }

    pub fn toggle_expanded(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }
}

/// Validate user input for the focus length.
///
/// The engine accepts any positive length; this is where the 1..=120 range
/// is enforced, before anything reaches the timer.
pub fn parse_focus_minutes(input: &str) -> Result<u32, ValidationError> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidNumber {
            field: "focus_minutes".into(),
            input: trimmed.to_string(),
        })?;
    check_focus_minutes(value)
}

pub fn check_focus_minutes(value: i64) -> Result<u32, ValidationError> {
    let (min, max) = (i64::from(MIN_FOCUS_MINUTES), i64::from(MAX_FOCUS_MINUTES));
    if !(min..=max).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: "focus_minutes".into(),
            value,
            min,
            max,
        });
    }
    // In range, so it fits.
    Ok(value as u32)
}
