//! Transport trait for the remote notes service.

use async_trait::async_trait;

use crate::result::AppResult;

/// Query string parameters, in the order they are sent.
pub type QueryParams = Vec<(String, String)>;

/// Trait for anything that can perform a JSON `GET` against the notes
/// service (an HTTP client in production, scripted fixtures in tests).
///
/// Implementations report unreachable hosts, timeouts, and non-success
/// HTTP statuses as [`ErrorKind::Network`](crate::error::ErrorKind::Network)
/// errors and undecodable bodies as
/// [`ErrorKind::Serialization`](crate::error::ErrorKind::Serialization).
/// They must not keep per-request mutable state, since several requests
/// may be in flight at once.
#[async_trait]
pub trait NotesTransport: Send + Sync + std::fmt::Debug + 'static {
    /// Issue `GET {base}{path}?{query}` and return the decoded JSON body.
    async fn get_json(&self, path: &str, query: &QueryParams) -> AppResult<serde_json::Value>;

    /// Short name used in log fields.
    fn transport_type(&self) -> &str;
}
