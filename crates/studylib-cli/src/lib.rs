//! # studylib-cli
//!
//! `clap` command definitions and table/JSON rendering for the
//! `study-library` binary.

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands};
pub use output::OutputFormat;
