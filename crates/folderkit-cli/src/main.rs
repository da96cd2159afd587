//! Folderkit CLI entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use folderkit_core::config::AppConfig;
use folderkit_core::config::logging::LoggingConfig;

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Commands that need configuration report a load failure themselves.
    let config = AppConfig::load(cli.config.as_deref());
    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    init_logging(&logging);

    if let Err(e) = cli.execute(config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing on stderr so JSON output on stdout stays clean.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
