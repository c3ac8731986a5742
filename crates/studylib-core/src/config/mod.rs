//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional TOML file overlaid with `STUDYLIB__*` environment
//! variables. Every field has a serde default, so an empty source yields
//! a working configuration.

pub mod api;
pub mod library;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::api::ApiConfig;
use self::library::LibraryConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote notes service settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Library behavior (paging, fallback, deletion policy).
    #[serde(default)]
    pub library: LibraryConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional; environment variables prefixed with
    /// `STUDYLIB` (sections separated by `__`) take precedence.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("STUDYLIB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
