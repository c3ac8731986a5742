//! # studylib-entity
//!
//! Domain models for the Study Library. `folder` and `material` hold the
//! canonical, normalized records the rest of the workspace operates on;
//! `wire` is the only place that knows what the remote service actually
//! sends and how to turn it into those records.

pub mod catalog;
pub mod folder;
pub mod material;
pub mod wire;

pub use catalog::Catalogued;
pub use folder::{Folder, FolderNode, FolderTree, NewFolder};
pub use material::{Material, MaterialOrigin};
