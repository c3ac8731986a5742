//! Core type definitions used across the Study Library workspace.

pub mod id;
pub mod pagination;
pub mod sorting;

pub use id::{FolderId, MaterialId};
pub use pagination::{PageRequest, PageResponse};
pub use sorting::{SortDirection, SortKey};
