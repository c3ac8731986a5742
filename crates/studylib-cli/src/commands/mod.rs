//! CLI command definitions and dispatch.

pub mod config;
pub mod folders;
pub mod open;
pub mod tree;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use studylib_core::config::AppConfig;
use studylib_core::error::AppError;
use studylib_core::traits::transport::NotesTransport;
use studylib_remote::HttpTransport;

use crate::output::OutputFormat;

/// Study Library: browse public study notes from the command line
#[derive(Debug, Parser)]
#[command(name = "study-library", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List folder summaries
    Folders,
    /// Print the folder hierarchy
    Tree,
    /// Show one page of a folder's notes
    Open(open::OpenArgs),
    /// Show the effective configuration
    Config,
}

impl Cli {
    /// Execute the command against the configured notes service
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        let transport: Arc<dyn NotesTransport> = Arc::new(HttpTransport::new(&config.api)?);
        self.execute_with(config, transport).await
    }

    /// Execute the command over an explicit transport
    pub async fn execute_with(
        &self,
        config: &AppConfig,
        transport: Arc<dyn NotesTransport>,
    ) -> Result<(), AppError> {
        match &self.command {
            Commands::Folders => folders::execute(config, transport, self.format).await,
            Commands::Tree => tree::execute(config, transport, self.format).await,
            Commands::Open(args) => open::execute(args, config, transport, self.format).await,
            Commands::Config => config::execute(config, self.format),
        }
    }
}
