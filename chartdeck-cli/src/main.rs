//! chartdeck - front page builder for a Helm chart repository
//!
//! Fetches the repository's index.yaml, extracts the published charts and
//! renders them as a static page or a terminal listing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use chartdeck_core::config::SiteConfig;
use chartdeck_core::site::SystemClipboard;

mod catalog_cli;

use catalog_cli::ChartCommand;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "chartdeck",
    about = "Builds and browses the front page of a Helm chart repository",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Override configuration file path
    #[clap(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[clap(flatten)]
    Chart(ChartCommand),

    /// Manage the configuration file
    Config {
        #[clap(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[clap(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

/// Initialize tracing from the --log-level flag
///
/// Logs go to stderr so stdout stays clean for JSON output.
fn initialize_tracing(log_level: &LogLevel) {
    let filter = EnvFilter::new(log_level.to_filter_directive());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    let config_path = match cli.config {
        Some(path) => path,
        None => SiteConfig::default_config_path()?,
    };
    debug!("Using config file {}", config_path.display());

    match cli.command {
        Command::Chart(command) => {
            let config = SiteConfig::load_from_path(&config_path)?;
            let clipboard = SystemClipboard::new();
            command.execute(&config, &clipboard).await
        }
        Command::Config { command } => execute_config(command, &config_path),
    }
}

fn execute_config(command: ConfigCommand, config_path: &Path) -> Result<()> {
    match command {
        ConfigCommand::Init { force } => {
            if config_path.exists() && !force {
                anyhow::bail!(
                    "Config already exists at {} (use --force to overwrite)",
                    config_path.display()
                );
            }
            SiteConfig::default().save(config_path)?;
            println!("Wrote default config to {}", config_path.display());
        }
        ConfigCommand::Show => {
            let config = SiteConfig::load_from_path(config_path)?;
            let yaml = serde_yaml_ng::to_string(&config).context("Failed to serialize config")?;
            println!("# {}", config_path.display());
            print!("{yaml}");
        }
    }

    Ok(())
}
