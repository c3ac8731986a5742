//! Listing parameters.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use studylib_core::types::{SortDirection, SortKey};

/// Category selector. `All` keeps every item, `Named` keeps items whose
/// category equals the name, ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Parse a user-supplied category. Empty input and `all` select
    /// everything.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(raw.to_string())
        }
    }

    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Named(wanted) => category.is_some_and(|c| c.eq_ignore_ascii_case(wanted)),
        }
    }
}

/// Filter and ordering applied to a listing before it is paginated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive search over title, description and tags.
    #[serde(default)]
    pub search: String,
    /// Keep items carrying at least one of these tags.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default)]
    pub sort_by: SortKey,
    /// Explicit direction; `None` uses the key's default.
    #[serde(default)]
    pub order: Option<SortDirection>,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn sorted_by(mut self, key: SortKey, order: Option<SortDirection>) -> Self {
        self.sort_by = key;
        self.order = order;
        self
    }

    /// Direction actually used for sorting.
    pub fn direction(&self) -> SortDirection {
        self.order.unwrap_or_else(|| self.sort_by.default_direction())
    }
}
