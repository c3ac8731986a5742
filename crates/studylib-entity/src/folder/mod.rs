//! Folder domain entities.

pub mod model;
pub mod tree;

pub use model::{Folder, NewFolder, slugify};
pub use tree::{FolderNode, FolderTree};
