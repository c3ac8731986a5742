//! # studylib-store
//!
//! The corpus: an explicit, injectable store of folders and materials.
//! Folders live in an arena keyed by id with parent links validated on
//! every insertion and move, so the hierarchy is always an acyclic forest
//! and walks over it always terminate.

pub mod corpus;
pub mod seed;

pub use corpus::{Corpus, DeletedFolder};
pub use seed::CorpusSeed;
