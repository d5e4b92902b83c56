//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - The terminal rendition of the weather widget

use clap::Parser;
use weather_core::Config;

mod cli;
mod logging;
mod tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    let config = Config::load()?;
    logging::init(&config);

    tracing::info!(command = ?cmd.command, "weather starting");
    cmd.run(config).await
}
