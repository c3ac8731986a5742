//! Sorting types for material and folder listings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl Default for SortDirection {
    fn default() -> Self {
        Self::Asc
    }
}

impl SortDirection {
    /// Return the wire keyword for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(AppError::validation(format!(
                "Unknown sort order '{other}'"
            ))),
        }
    }
}

/// The key a listing is ordered by.
///
/// Several wire names map to the same ordering: `name` and `title` both
/// sort by display text, `date` and `createdAt` both sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    /// Display text (`title` / `name`).
    #[serde(alias = "name")]
    #[serde(rename = "title")]
    Title,
    /// Creation timestamp (`createdAt` / `date`).
    #[serde(alias = "date")]
    #[serde(rename = "createdAt")]
    CreatedAt,
    /// Last-edit timestamp.
    #[serde(rename = "lastEditedAt")]
    LastEditedAt,
    /// Most recently touched: last edit, falling back to creation.
    #[serde(rename = "recent")]
    Recent,
    /// Content length for materials, material count for folders.
    #[serde(rename = "size")]
    Size,
}

impl Default for SortKey {
    fn default() -> Self {
        Self::Recent
    }
}

impl SortKey {
    /// Direction used when the caller does not pick one.
    pub fn default_direction(&self) -> SortDirection {
        match self {
            Self::Title => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    /// Return the canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::CreatedAt => "createdAt",
            Self::LastEditedAt => "lastEditedAt",
            Self::Recent => "recent",
            Self::Size => "size",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" | "name" => Ok(Self::Title),
            "createdAt" | "date" => Ok(Self::CreatedAt),
            "lastEditedAt" => Ok(Self::LastEditedAt),
            "recent" => Ok(Self::Recent),
            "size" => Ok(Self::Size),
            other => Err(AppError::validation(format!("Unknown sort key '{other}'"))),
        }
    }
}
