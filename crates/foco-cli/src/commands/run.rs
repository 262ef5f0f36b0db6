//! Interactive terminal widget.
//!
//! Reads one command per line from stdin while the timer service counts
//! down in the background. Every published snapshot redraws the status line.

use std::io::{IsTerminal, Write};

use clap::Args;
use foco_core::widget::parse_focus_minutes;
use foco_core::{Config, Event, IntervalSource, TimerEngine, TimerHandle, TimerService, Widget};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use super::{focus_minutes_arg, tick_period};
use crate::render;

const HELP: &str = "\
commands:
  start | pause | toggle (or empty line) | reset
  focus <minutes>     set focus length (1-120)
  add <text>          add a task
  done <n>            toggle task n
  rm <n>              remove task n
  tasks               list tasks
  theme | block | mute
  settings            open/close the settings panel
  status | help | quit";

#[derive(Args)]
pub struct RunArgs {
    /// Focus length in minutes (1-120)
    #[arg(long, value_parser = focus_minutes_arg)]
    focus_minutes: Option<u32>,
    /// Tick period in milliseconds
    #[arg(long, hide = true)]
    tick_ms: Option<u64>,
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Start,
    Pause,
    Toggle,
    Reset,
    Focus(String),
    Add(String),
    Done(String),
    Remove(String),
    Tasks,
    Theme,
    Block,
    Mute,
    Settings,
    Status,
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim().to_string()),
        None => (line, String::new()),
    };
    match word.to_ascii_lowercase().as_str() {
        "start" => Input::Start,
        "pause" => Input::Pause,
        "" | "toggle" => Input::Toggle,
        "reset" => Input::Reset,
        "focus" => Input::Focus(rest),
        "add" => Input::Add(rest),
        "done" => Input::Done(rest),
        "rm" => Input::Remove(rest),
        "tasks" => Input::Tasks,
        "theme" => Input::Theme,
        "block" => Input::Block,
        "mute" => Input::Mute,
        "settings" => Input::Settings,
        "status" => Input::Status,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    }
}

/// Resolve a 1-based task number to its id.
fn task_id(widget: &Widget, arg: &str) -> Result<String, String> {
    let n: usize = arg
        .parse()
        .map_err(|_| format!("expected a task number, got {arg:?}"))?;
    n.checked_sub(1)
        .and_then(|i| widget.tasks.nth(i))
        .map(|t| t.id.clone())
        .ok_or_else(|| format!("no task {n}"))
}

struct Screen {
    out: std::io::Stdout,
    live: bool,
    status_pending: bool,
}

impl Screen {
    fn new() -> Self {
        let out = std::io::stdout();
        let live = out.is_terminal();
        Self {
            out,
            live,
            status_pending: false,
        }
    }

    /// Redraw the status line in place on a terminal, append otherwise.
    fn status(&mut self, line: &str) -> std::io::Result<()> {
        if self.live {
            write!(self.out, "\r{line}\x1b[K")?;
            self.status_pending = true;
            self.out.flush()
        } else {
            writeln!(self.out, "{line}")
        }
    }

    fn say(&mut self, text: &str) -> std::io::Result<()> {
        if self.status_pending {
            writeln!(self.out)?;
            self.status_pending = false;
        }
        writeln!(self.out, "{text}")
    }
}

pub async fn run(args: RunArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let focus_minutes = args.focus_minutes.unwrap_or(config.timer.focus_minutes);
    let mut widget = Widget::from_config(config);

    let (tx, mut events) = mpsc::unbounded_channel();
    let handle = TimerService::spawn(
        TimerEngine::new(focus_minutes),
        IntervalSource::new(tick_period(args.tick_ms, config)),
        tx,
    );
    let mut snapshots = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut screen = Screen::new();

    screen.say("Foco - stay productive, stay calm. Type 'help' for commands.")?;
    screen.status(&render::status_line(&handle.latest(), widget.theme))?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let input = parse_input(&line);
                debug!(?input, "command");
                if input == Input::Quit {
                    break;
                }
                handle_input(input, &handle, &mut widget, &mut screen).await?;
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                screen.status(&render::status_line(&snapshot, widget.theme))?;
            }
            Some(event) = events.recv() => {
                if widget.tally.record(&event) {
                    if let Some(message) = widget.tally.message() {
                        screen.say(&message)?;
                    }
                    screen.say("Break time. Type 'start' when ready.")?;
                } else if matches!(event, Event::BreakCompleted { .. }) {
                    screen.say("Break over. Type 'start' to focus.")?;
                }
            }
        }
    }

    if screen.status_pending {
        screen.say("")?;
    }
    handle.shutdown().await?;
    Ok(())
}

async fn handle_input(
    input: Input,
    handle: &TimerHandle,
    widget: &mut Widget,
    screen: &mut Screen,
) -> Result<(), Box<dyn std::error::Error>> {
    match input {
        Input::Start => {
            handle.start().await?;
        }
        Input::Pause => {
            handle.pause().await?;
        }
        Input::Toggle => {
            handle.toggle().await?;
        }
        Input::Reset => {
            handle.reset().await?;
        }
        Input::Focus(arg) => match parse_focus_minutes(&arg) {
            Ok(minutes) => {
                let snapshot = handle.set_focus_minutes(minutes).await?;
                if snapshot.total_secs == minutes * 60
                    && snapshot.phase == foco_core::Phase::Focus
                {
                    screen.say(&format!("Focus length set to {minutes} minutes."))?;
                } else {
                    screen.say(&format!(
                        "Focus length will be {minutes} minutes once the timer stops in focus."
                    ))?;
                }
            }
            Err(e) => screen.say(&format!("error: {e}"))?,
        },
        Input::Add(text) => match widget.tasks.add(&text) {
            Ok(task) => {
                let line = format!("Added: {}", task.text);
                screen.say(&line)?;
            }
            Err(e) => screen.say(&format!("error: {e}"))?,
        },
        Input::Done(arg) => {
            let toggled = task_id(widget, &arg)
                .and_then(|id| widget.tasks.toggle(&id).map_err(|e| e.to_string()));
            match toggled {
                Ok(_) => screen.say(&render::task_list(&widget.tasks))?,
                Err(e) => screen.say(&format!("error: {e}"))?,
            }
        }
        Input::Remove(arg) => {
            let removed = task_id(widget, &arg)
                .and_then(|id| widget.tasks.remove(&id).map_err(|e| e.to_string()));
            match removed {
                Ok(task) => screen.say(&format!("Removed: {}", task.text))?,
                Err(e) => screen.say(&format!("error: {e}"))?,
            }
        }
        Input::Tasks => screen.say(&render::task_list(&widget.tasks))?,
        Input::Theme => {
            let theme = widget.theme.toggle();
            screen.say(&format!("Theme: {}", if theme.is_dark() { "dark" } else { "light" }))?;
        }
        Input::Block => {
            let on = widget.controls.toggle_distractions();
            screen.say(&format!("Distraction blocking {}", if on { "on" } else { "off" }))?;
        }
        Input::Mute => {
            let on = widget.controls.toggle_notifications();
            screen.say(&format!("Notifications {}", if on { "muted" } else { "on" }))?;
        }
        Input::Settings => {
            if !widget.controls.toggle_expanded() {
                screen.say("Settings closed.")?;
                return Ok(());
            }
            let snapshot = handle.snapshot().await?;
            let c = &widget.controls;
            screen.say(&format!(
                "focus: {} min | distractions blocked: {} | notifications muted: {} | sessions today: {}",
                snapshot.focus_minutes,
                c.distractions_blocked,
                c.notifications_muted,
                widget.tally.completed()
            ))?;
        }
        Input::Status => {
            let snapshot = handle.snapshot().await?;
            screen.say(&render::status_line(&snapshot, widget.theme))?;
        }
        Input::Help => screen.say(HELP)?,
        Input::Quit => {}
        Input::Unknown(line) => screen.say(&format!("unknown command: {line} (try 'help')"))?,
    }
    Ok(())
}
