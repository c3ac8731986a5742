//! Library behavior configuration.

use serde::{Deserialize, Serialize};

/// What happens to child folders when their parent is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// Move direct children up to the deleted folder's parent.
    #[default]
    Reparent,
    /// Refuse to delete a folder that still has children.
    Refuse,
}

/// Library configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Default number of materials per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Number of synthetic materials served when a folder cannot be fetched.
    #[serde(default = "default_synthetic_count")]
    pub synthetic_count: usize,
    /// Fail on malformed ids/dates instead of substituting placeholders.
    #[serde(default)]
    pub strict_normalization: bool,
    /// Child-folder policy for folder deletion.
    #[serde(default)]
    pub delete_policy: DeletePolicy,
    /// TTL of the folder summary cache in seconds (0 disables caching).
    #[serde(default)]
    pub summary_cache_ttl_seconds: u64,
    /// Maximum number of cached summary lists.
    #[serde(default = "default_summary_cache_capacity")]
    pub summary_cache_capacity: u64,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            synthetic_count: default_synthetic_count(),
            strict_normalization: false,
            delete_policy: DeletePolicy::default(),
            summary_cache_ttl_seconds: 0,
            summary_cache_capacity: default_summary_cache_capacity(),
        }
    }
}

fn default_page_size() -> u64 {
    12
}

fn default_synthetic_count() -> usize {
    3
}

fn default_summary_cache_capacity() -> u64 {
    64
}
