use std::path::Path;

use clap::Subcommand;
use foco_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "timer.focus_minutes", "ui.dark_mode")
        key: String,
    },
    /// List all config values
    List,
    /// Print the config file location
    Path,
}

pub fn run(
    action: ConfigAction,
    config: &Config,
    explicit_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => match config.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown key: {key}").into()),
        },
        ConfigAction::List => {
            let json = serde_json::to_string_pretty(config)?;
            println!("{json}");
        }
        ConfigAction::Path => {
            let path = explicit_path
                .map(Path::to_path_buf)
                .or_else(Config::default_path)
                .ok_or("no config directory on this platform")?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
