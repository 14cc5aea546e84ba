//! HgrKit CLI - Command-line interface for KA3D asset tools

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;
use tracing::Level;

#[derive(Parser)]
#[command(name = "hgrkit")]
#[command(about = "HgrKit: KA3D HGR scene and NTX texture tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Print decoder debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Run the HgrKit CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .init();

    cli.command.execute()?;

    Ok(())
}
