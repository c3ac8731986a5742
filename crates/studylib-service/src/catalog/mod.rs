//! Search, sort and pagination over folders and materials.

pub mod pipeline;
pub mod query;

pub use pipeline::{filter, paginate, run, sort};
pub use query::{CatalogQuery, CategoryFilter};
