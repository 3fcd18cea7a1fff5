//! Command-line surface: clap definitions and the tokio entry point.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colloq_core::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "colloq")]
#[command(version)]
#[command(about = "Chat with your PDF documents from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Load configuration from this file instead of the default path
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print where the config file lives
    Path,
    /// Write a starter config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    // a single runtime for the whole process
    tokio::runtime::Runtime::new()
        .context("create tokio runtime")?
        .block_on(dispatch(cli))
}

async fn dispatch(cli: Cli) -> Result<()> {
    // bare `colloq` runs the chat UI
    let Some(command) = cli.command else {
        let config = load_config(cli.config.as_deref())?;
        return commands::chat::run(config).await;
    };

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

fn load_config(override_path: Option<&Path>) -> Result<Config> {
    match override_path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("load config from {}", path.display())),
        None => Config::load().context("load config"),
    }
}
