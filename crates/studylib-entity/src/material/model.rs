//! Material (note) entity model.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use studylib_core::types::MaterialId;

/// Timestamp used when a record carries no usable date.
pub const PLACEHOLDER_TIMESTAMP: &str = "1970-01-01T00:00:00.000Z";

/// Where a material record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialOrigin {
    /// Fetched from the notes service (or seeded locally).
    #[default]
    Remote,
    /// Generated because the notes service could not supply the folder.
    Synthetic,
    /// Stand-in for a reference whose record is missing.
    Placeholder,
}

/// A study note. Exactly one authoritative record exists per id; folders
/// reference it by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Unique identifier across the whole corpus.
    pub id: MaterialId,
    /// Display title.
    pub title: String,
    /// Short description or excerpt.
    #[serde(default)]
    pub description: String,
    /// Rich-text (HTML) body.
    #[serde(default)]
    pub content: String,
    /// Tags.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Category; empty means uncategorized.
    #[serde(default)]
    pub category: String,
    /// Creation timestamp, always a plain string.
    pub created_at: String,
    /// Last-edit timestamp, always a plain string.
    pub last_edited_at: String,
    /// Provenance of this record.
    #[serde(default)]
    pub origin: MaterialOrigin,
}

impl Material {
    /// Create a remote material with the given id and title.
    pub fn new(id: impl Into<MaterialId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            content: String::new(),
            tags: BTreeSet::new(),
            category: String::new(),
            created_at: PLACEHOLDER_TIMESTAMP.to_string(),
            last_edited_at: PLACEHOLDER_TIMESTAMP.to_string(),
            origin: MaterialOrigin::Remote,
        }
    }

    /// Well-formed stand-in for a folder reference with no record.
    pub fn placeholder(id: MaterialId) -> Self {
        Self {
            description: "This note is no longer available.".to_string(),
            origin: MaterialOrigin::Placeholder,
            ..Self::new(id, "Missing note")
        }
    }

    /// Set the tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the body.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set both timestamps.
    pub fn with_dates(mut self, created_at: impl Into<String>, last_edited_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self.last_edited_at = last_edited_at.into();
        self
    }

    /// Whether the material carries `tag` (case-insensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Whether this record is degraded content rather than a real note.
    pub fn is_degraded(&self) -> bool {
        self.origin != MaterialOrigin::Remote
    }
}
