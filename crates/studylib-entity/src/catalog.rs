//! Read-only view shared by everything the search/sort pipeline can list.

use std::collections::BTreeSet;

use crate::folder::Folder;
use crate::material::Material;

/// Fields the search/sort/paginate pipeline reads.
pub trait Catalogued {
    /// Display text matched by search and used for `title` ordering.
    fn title(&self) -> &str;
    /// Secondary text matched by search.
    fn description(&self) -> &str;
    /// Tags matched by search and by the tag filter.
    fn tags(&self) -> &BTreeSet<String>;
    /// Category, if the item has one.
    fn category(&self) -> Option<&str>;
    /// Creation timestamp (normalized string).
    fn created_at(&self) -> &str;
    /// Last-edit timestamp (normalized string).
    fn last_edited_at(&self) -> &str;
    /// Magnitude used for `size` ordering.
    fn size(&self) -> u64;
}

impl Catalogued for Material {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    fn category(&self) -> Option<&str> {
        (!self.category.is_empty()).then_some(self.category.as_str())
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn last_edited_at(&self) -> &str {
        &self.last_edited_at
    }

    fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

impl Catalogued for Folder {
    fn title(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    fn category(&self) -> Option<&str> {
        None
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn last_edited_at(&self) -> &str {
        &self.updated_at
    }

    // Summaries arrive before contents are loaded, so fall back to the
    // server-reported count.
    fn size(&self) -> u64 {
        if self.material_ids.is_empty() {
            self.note_count
        } else {
            self.material_ids.len() as u64
        }
    }
}
