use serde::{Deserialize, Serialize};

/// Break length is fixed; only focus length is configurable.
pub const BREAK_MINUTES: u32 = 5;

/// Default focus length for a fresh widget.
pub const DEFAULT_FOCUS_MINUTES: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    /// Phase length in seconds for the given focus length.
    ///
    /// Uses saturating arithmetic so absurd focus lengths cannot overflow.
    pub fn duration_secs(self, focus_minutes: u32) -> u32 {
        match self {
            Phase::Focus => focus_minutes.saturating_mul(60),
            Phase::Break => BREAK_MINUTES * 60,
        }
    }

    /// The phase that follows this one.
    pub fn next(self) -> Self {
        match self {
            Phase::Focus => Phase::Break,
            Phase::Break => Phase::Focus,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::Break => "Break",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Render seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn break_is_five_minutes_regardless_of_focus() {
        assert_eq!(Phase::Break.duration_secs(25), 300);
        assert_eq!(Phase::Break.duration_secs(120), 300);
    }

    #[test]
    fn focus_scales_with_minutes() {
        assert_eq!(Phase::Focus.duration_secs(1), 60);
        assert_eq!(Phase::Focus.duration_secs(50), 3000);
        assert_eq!(Phase::Focus.duration_secs(u32::MAX), u32::MAX);
    }

    #[test]
    fn phases_alternate() {
        assert_eq!(Phase::Focus.next(), Phase::Break);
        assert_eq!(Phase::Break.next(), Phase::Focus);
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(120 * 60), "120:00");
    }

    #[test]
    fn phase_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Phase::Break).unwrap(), "\"break\"");
    }
}
