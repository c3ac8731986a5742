//! Scripted in-memory transport.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use studylib_core::error::{AppError, ErrorKind};
use studylib_core::result::AppResult;
use studylib_core::traits::transport::{NotesTransport, QueryParams};

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    Fail(ErrorKind, String),
    Hang,
}

#[derive(Debug, Clone)]
struct Route {
    reply: Reply,
    delay: Duration,
}

/// A recorded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Request path.
    pub path: String,
    /// Query parameters.
    pub query: QueryParams,
}

/// Transport that answers from a table of scripted routes keyed by path.
///
/// Unscripted paths fail with a `Network` error, like an HTTP 404 from
/// the real service.
#[derive(Debug, Default)]
pub struct FixtureTransport {
    routes: Mutex<HashMap<String, Route>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FixtureTransport {
    /// Create a transport with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` with `body`.
    pub fn respond(&self, path: &str, body: Value) -> &Self {
        self.set_reply(path, Reply::Json(body))
    }

    /// Fail `path` with an error of `kind`.
    pub fn fail(&self, path: &str, kind: ErrorKind, message: &str) -> &Self {
        self.set_reply(path, Reply::Fail(kind, message.to_string()))
    }

    /// Never answer `path` (callers are expected to time out).
    pub fn hang(&self, path: &str) -> &Self {
        self.set_reply(path, Reply::Hang)
    }

    /// Delay every answer on `path`.
    pub fn delay(&self, path: &str, delay: Duration) -> &Self {
        let mut routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
        routes
            .entry(path.to_string())
            .or_insert_with(|| Route {
                reply: Reply::Fail(ErrorKind::Network, format!("no route for {path}")),
                delay: Duration::ZERO,
            })
            .delay = delay;
        self
    }

    /// All requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of requests received for `path`.
    pub fn request_count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    fn set_reply(&self, path: &str, reply: Reply) -> &Self {
        let mut routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
        let delay = routes.get(path).map(|r| r.delay).unwrap_or_default();
        routes.insert(path.to_string(), Route { reply, delay });
        self
    }
}

#[async_trait]
impl NotesTransport for FixtureTransport {
    async fn get_json(&self, path: &str, query: &QueryParams) -> AppResult<Value> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedRequest {
                path: path.to_string(),
                query: query.clone(),
            });

        // Clone out of the lock: it must not be held across the await.
        let route = self
            .routes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .cloned();
        let Some(route) = route else {
            debug!(path, "No fixture route");
            return Err(AppError::network(format!("{path} answered HTTP 404 Not Found")));
        };

        if !route.delay.is_zero() {
            tokio::time::sleep(route.delay).await;
        }

        match route.reply {
            Reply::Json(body) => Ok(body),
            Reply::Fail(kind, message) => Err(AppError::new(kind, message)),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
                Err(AppError::network(format!("{path} never answered")))
            }
        }
    }

    fn transport_type(&self) -> &str {
        "fixture"
    }
}
