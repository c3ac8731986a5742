//! `config`: show the effective configuration.

use studylib_core::config::AppConfig;
use studylib_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Execute the config command
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => output::print_json(config),
        OutputFormat::Table => {
            println!("[api]");
            output::print_kv("base_url", &config.api.base_url);
            output::print_kv("username", &config.api.username);
            output::print_kv("timeout_ms", &config.api.request_timeout_ms.to_string());
            output::print_kv("fetch_limit", &config.api.fetch_limit.to_string());
            println!("[library]");
            output::print_kv("page_size", &config.library.page_size.to_string());
            output::print_kv("synthetic", &config.library.synthetic_count.to_string());
            output::print_kv("strict", &config.library.strict_normalization.to_string());
            output::print_kv("delete_policy", &format!("{:?}", config.library.delete_policy));
            output::print_kv(
                "cache_ttl_secs",
                &config.library.summary_cache_ttl_seconds.to_string(),
            );
            println!("[logging]");
            output::print_kv("level", &config.logging.level);
            output::print_kv("format", &config.logging.format);
        }
    }
    Ok(())
}
