//! Remote notes service configuration.

use serde::{Deserialize, Serialize};

/// Notes API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the notes service (no trailing slash required).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Public username whose folders are browsed.
    #[serde(default)]
    pub username: String,
    /// Ask the service to include note counts in folder summaries.
    #[serde(default = "default_true")]
    pub include_note_count: bool,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
    /// Number of notes requested per folder; paging happens locally.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: String::new(),
            include_note_count: true,
            request_timeout_ms: default_request_timeout(),
            fetch_limit: default_fetch_limit(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_true() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    8000
}

fn default_fetch_limit() -> u32 {
    500
}
