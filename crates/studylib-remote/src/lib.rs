//! # studylib-remote
//!
//! Implementations of [`NotesTransport`](studylib_core::traits::NotesTransport):
//!
//! - **http**: `reqwest`-backed client for the real notes service
//! - **mock**: scripted in-memory responses with injectable failures and
//!   delays, for tests and offline demos

#[cfg(feature = "mock")]
pub mod fixture;
#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "mock")]
pub use fixture::FixtureTransport;
#[cfg(feature = "http")]
pub use http::HttpTransport;
