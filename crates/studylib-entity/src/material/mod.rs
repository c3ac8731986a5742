//! Material (note) domain entities.

pub mod model;

pub use model::{Material, MaterialOrigin, PLACEHOLDER_TIMESTAMP};
