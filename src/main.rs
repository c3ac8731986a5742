//! Study Library - browse public study notes
//!
//! Main entry point: parses the command line, loads configuration,
//! installs logging, and runs the selected command.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use studylib_cli::Cli;
use studylib_core::config::AppConfig;
use studylib_core::error::AppError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = cli.execute(&config).await {
        tracing::error!(kind = %e.kind, retryable = e.is_retryable(), "{}", e.message);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
///
/// `STUDYLIB_CONFIG` overrides the path given on the command line.
fn load_configuration(cli_path: &str) -> Result<AppConfig, AppError> {
    let config_path = std::env::var("STUDYLIB_CONFIG").unwrap_or_else(|_| cli_path.to_string());

    AppConfig::load(&config_path)
        .map_err(|e| AppError::configuration(format!("Config load error ({config_path}): {}", e.message)))
}

/// Initialize tracing/logging
///
/// Logs go to stderr so that table and JSON output on stdout stay clean.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
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
