pub mod config;
pub mod cycle;
pub mod run;

use std::time::Duration;

use foco_core::widget::parse_focus_minutes;
use foco_core::Config;

/// clap value parser for `--focus-minutes`, enforcing the 1..=120 range.
pub fn focus_minutes_arg(input: &str) -> Result<u32, String> {
    parse_focus_minutes(input).map_err(|e| e.to_string())
}

/// Tick period from `--tick-ms`, falling back to the config.
pub fn tick_period(tick_ms: Option<u64>, config: &Config) -> Duration {
    match tick_ms {
        Some(ms) => Duration::from_millis(ms.max(1)),
        None => config.tick_period(),
    }
}
