//! Remote notes access with synthetic fallback.

pub mod client;
pub mod synthetic;

pub use client::{
    ContentsQuery, FOLDERS_PATH, FolderContents, FolderSnapshot, NotesClient, contents_path,
};
pub use synthetic::{SYNTHETIC_TAG, synthesize};
