// In app/src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use core_types::Symbol;
use engine::SnapshotAssembler;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "A market snapshot service: RSI signal plus headline sentiment.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs the web server that serves snapshots as JSON.
    Serve,

    /// Takes a single snapshot and prints it as JSON.
    Snapshot {
        /// The symbol to analyze (e.g., "^NSEI"). Defaults to the configured symbol.
        #[arg(short, long)]
        symbol: Option<String>,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings().context("Failed to load settings")?;

    // `RUST_LOG` wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.app.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(environment = %settings.app.environment, "Starting Market Pulse");

    let assembler = Arc::new(SnapshotAssembler::from_settings(&settings)?);

    match cli.command {
        Commands::Serve => {
            web_server::run(&settings.server, assembler).await?;
        }
        Commands::Snapshot { symbol } => {
            handle_snapshot(&assembler, symbol).await?;
        }
    }

    tracing::info!("Market Pulse has finished successfully.");

    Ok(())
}

/// Handles the `snapshot` command.
async fn handle_snapshot(assembler: &SnapshotAssembler, symbol: Option<String>) -> Result<()> {
    let symbol = match symbol {
        Some(raw) => Symbol::parse(&raw)?,
        None => assembler.default_symbol().clone(),
    };

    let snapshot = assembler.snapshot(&symbol).await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
