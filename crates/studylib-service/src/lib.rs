//! # studylib-service
//!
//! Application layer of the Study Library. The [`NotesClient`] talks to
//! the remote notes service through a [`NotesTransport`], the `catalog`
//! pipeline narrows listings, `navigation` keeps browser-style history
//! and request generations, and [`StudyLibrary`] ties them to one
//! [`Corpus`](studylib_store::Corpus).
//!
//! Dependencies are injected at construction time behind `Arc`.
//!
//! [`NotesTransport`]: studylib_core::traits::NotesTransport

pub mod catalog;
pub mod library;
pub mod navigation;
pub mod notes;

pub use catalog::{CatalogQuery, CategoryFilter};
pub use library::{ApplyOutcome, StudyLibrary};
pub use navigation::{FetchTicket, NavigationHistory, RequestTracker};
pub use notes::{ContentsQuery, FolderContents, FolderSnapshot, NotesClient};
