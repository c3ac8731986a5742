//! # studylib-core
//!
//! Core crate for the Study Library. Contains the transport trait,
//! configuration schemas, typed identifiers, pagination/sorting types,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Study Library crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
