//! Text rendering for the terminal widget.

use foco_core::{TaskList, Theme, TimerSnapshot};

const BAR_WIDTH: usize = 20;

pub fn progress_bar(progress: f64, width: usize, theme: Theme) -> String {
    let filled = ((progress.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let (on, off) = if theme.is_dark() { ('█', '░') } else { ('#', '-') };
    std::iter::repeat(on)
        .take(filled)
        .chain(std::iter::repeat(off).take(width - filled))
        .collect()
}

/// `Focus 24:59 [#-------------------]   0% running`
pub fn status_line(snapshot: &TimerSnapshot, theme: Theme) -> String {
    let state = if snapshot.is_running { "running" } else { "paused" };
    format!(
        "{:<5} {} [{}] {:>3.0}% {}",
        snapshot.phase.label(),
        snapshot.clock(),
        progress_bar(snapshot.progress, BAR_WIDTH, theme),
        snapshot.progress,
        state
    )
}

pub fn task_list(tasks: &TaskList) -> String {
    let mut out = format!("Today's tasks ({})", tasks.summary());
    for (i, task) in tasks.iter().enumerate() {
        let mark = if task.completed { 'x' } else { ' ' };
        out.push_str(&format!("\n  {}. [{mark}] {}", i + 1, task.text));
    }
    out
}
