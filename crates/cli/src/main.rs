//! `fieldlog` binary entry point

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use fieldlog_cli::{commands, AppContext, Cli};
use fieldlog_domain::Result;
use fieldlog_infra::config;

#[tokio::main]
async fn main() {
    init_tracing();

    // Logging first so the .env outcome is visible.
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "Loaded environment from .env"),
        Err(err) if err.not_found() => debug!("No .env file found"),
        Err(err) => warn!(error = %err, "Failed to load .env"),
    }

    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.clone() {
        Some(path) => config::load_from_file(Some(path))?,
        None => config::load()?,
    };

    let ctx = AppContext::new_with_config(config)?;
    commands::dispatch(&ctx, cli.command).await
}

/// Route diagnostics to stderr so stdout stays clean for command output.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("FIELDLOG_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
