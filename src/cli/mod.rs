use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;
pub mod report;

/// caBLE v2 Advertisement Analyser
#[derive(Parser)]
#[command(name = "cable-scan")]
#[command(about = "Detect FIDO hybrid-transport (caBLE v2) structures in BLE advertisements")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Replay a captured advertisement session through the analyser
    Analyse(commands::analyse::AnalyseCommand),
    /// Analyse a single hex payload as manufacturer or service data
    Inspect(commands::inspect::InspectCommand),
}

pub async fn run() -> AppResult<()> {
    // Initialise tracing subscriber to capture info!() macros
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyse(command) => command.run().await,
        Commands::Inspect(command) => command.run(),
    }
}
