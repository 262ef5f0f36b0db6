use std::path::PathBuf;

use clap::{Parser, Subcommand};
use foco_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "foco-cli", version, about = "Foco focus timer")]
struct Cli {
    /// Path to config.toml (defaults to the platform config dir)
    #[arg(long, env = "FOCO_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log level for diagnostics on stderr (overridden by RUST_LOG)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive timer and task list
    Run(commands::run::RunArgs),
    /// Run focus/break cycles unattended, printing events as JSON
    Cycle(commands::cycle::CycleArgs),
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("foco_core={level},foco_cli={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match load_config(cli.config.as_ref()) {
        Ok(config) => match cli.command {
            Commands::Run(args) => commands::run::run(args, &config).await,
            Commands::Cycle(args) => commands::cycle::run(args, &config).await,
            Commands::Config { action } => {
                commands::config::run(action, &config, cli.config.as_deref())
            }
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
