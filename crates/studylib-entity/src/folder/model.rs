//! Folder entity model.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use studylib_core::types::{FolderId, MaterialId};

/// A folder in the study-note hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier, stable for the session.
    pub id: FolderId,
    /// Display name.
    pub name: String,
    /// URL slug used by the remote service to address the folder.
    pub slug: String,
    /// Display description.
    #[serde(default)]
    pub description: String,
    /// Parent folder (None for roots).
    #[serde(default)]
    pub parent_id: Option<FolderId>,
    /// Materials in display order. Never contains duplicates.
    #[serde(default)]
    pub material_ids: Vec<MaterialId>,
    /// Cross-cutting tags.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Note count reported by the folder summary.
    #[serde(default)]
    pub note_count: u64,
    /// Creation timestamp, normalized (may be empty).
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp, normalized (may be empty).
    #[serde(default)]
    pub updated_at: String,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether the folder references the given material.
    pub fn contains(&self, material_id: &MaterialId) -> bool {
        self.material_ids.contains(material_id)
    }

    /// Whether the folder carries `tag` (case-insensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Data required to add a folder to the corpus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewFolder {
    /// Folder identifier.
    pub id: FolderId,
    /// Display name.
    pub name: String,
    /// Slug; derived from the name when empty.
    #[serde(default)]
    pub slug: String,
    /// Display description.
    #[serde(default)]
    pub description: String,
    /// Parent folder (None for a root).
    #[serde(default)]
    pub parent_id: Option<FolderId>,
    /// Initial material references.
    #[serde(default)]
    pub material_ids: Vec<MaterialId>,
    /// Tags.
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl NewFolder {
    /// Start a root folder with the given id and name.
    pub fn new(id: impl Into<FolderId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the parent folder.
    pub fn with_parent(mut self, parent_id: impl Into<FolderId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the initial material references.
    pub fn with_materials<I, M>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MaterialId>,
    {
        self.material_ids = ids.into_iter().map(Into::into).collect();
        self
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

    /// Set an explicit slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Build the folder record, deduplicating material references.
    pub fn into_folder(self) -> Folder {
        let slug = if self.slug.trim().is_empty() {
            slugify(&self.name)
        } else {
            self.slug
        };

        let mut material_ids: Vec<MaterialId> = Vec::with_capacity(self.material_ids.len());
        for id in self.material_ids {
            if !material_ids.contains(&id) {
                material_ids.push(id);
            }
        }

        Folder {
            id: self.id,
            name: self.name,
            slug,
            description: self.description,
            parent_id: self.parent_id,
            note_count: material_ids.len() as u64,
            material_ids,
            tags: self.tags,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }
}

/// Derive a URL slug from a display name (`"React Dev"` → `"react-dev"`).
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
