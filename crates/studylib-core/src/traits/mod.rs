//! Trait definitions for pluggable backends.

pub mod transport;

pub use transport::{NotesTransport, QueryParams};
