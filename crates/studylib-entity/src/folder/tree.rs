//! Folder tree structures for hierarchical display.

use serde::{Deserialize, Serialize};
use studylib_core::types::FolderId;

/// A node in a folder tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Folder slug.
    pub slug: String,
    /// Depth below the tree root (0 for the root itself).
    pub depth: u32,
    /// Number of direct child folders.
    pub child_count: u64,
    /// Number of materials referenced by this folder.
    pub material_count: u64,
    /// Child folder nodes, in insertion order.
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Visit this node and its descendants depth-first, pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a FolderNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// The whole forest of folders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolderTree {
    /// The root node(s) of the forest.
    pub roots: Vec<FolderNode>,
    /// Total number of folders in the forest.
    pub total_folders: u64,
}

impl FolderTree {
    /// Create an empty folder tree.
    pub fn empty() -> Self {
        Self::default()
    }
}
