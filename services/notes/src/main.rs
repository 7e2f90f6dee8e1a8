//! Entrypoint for the `notes` binary
//!
//! 1. Parses the command line.
//! 2. Loads configuration from the environment.
//! 3. Initializes logging (to stderr, so command output stays clean).
//! 4. Loads the content and runs the command.

use anyhow::Context;
use clap::Parser;
use notes_service::{cli::Cli, commands, config::Config};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
    info!(
        content_path = %config.content_path.display(),
        command = ?cli.command,
        "Configuration loaded"
    );

    let mut stdout = std::io::stdout().lock();
    commands::execute(cli, &config, &mut stdout).await
}
