//! Binary crate for the `weather-panel` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Writing the weather panel to the terminal

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

const DEFAULT_FILTER: &str = "weather_panel=info,weather_panel_core=info";

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cmd = cli::Cli::parse();
    cmd.run().await
}
