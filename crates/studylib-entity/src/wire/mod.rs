//! Wire shapes of the remote notes service and their normalization.
//!
//! The service is backed by a document store and leaks its extended-JSON
//! encoding: an id may be `"abc"`, `42`, or `{"$oid": "abc"}`, a timestamp
//! may be `"2024-01-01T00:00:00Z"` or `{"$date": ...}`. [`WireString`]
//! names every accepted shape; [`normalize`] decodes a raw value once and
//! hands back a plain string, so nothing past this module branches on wire
//! format.

pub mod convert;
pub mod dto;

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use studylib_core::error::AppError;
use studylib_core::result::AppResult;

pub use convert::Normalizer;
pub use dto::{ApiEnvelope, FolderContentsData, FolderListData, FolderSummaryDto, NoteDto};

/// Every accepted encoding of an id or timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireString {
    /// A bare string.
    Plain(String),
    /// A bare integer (numeric ids).
    Number(i64),
    /// `{"$oid": "..."}`
    ObjectId {
        /// The wrapped id.
        #[serde(rename = "$oid")]
        oid: String,
    },
    /// `{"$date": ...}`
    Date {
        /// The wrapped date.
        #[serde(rename = "$date")]
        date: WireDate,
    },
}

/// Payload of a `$date` wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireDate {
    /// ISO-8601 text.
    Iso(String),
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// `{"$numberLong": "..."}` milliseconds since the Unix epoch.
    NumberLong {
        /// Millisecond count as text.
        #[serde(rename = "$numberLong")]
        number_long: String,
    },
}

impl WireString {
    /// Reduce the wire value to its plain-string form.
    pub fn into_plain(self) -> AppResult<String> {
        match self {
            Self::Plain(s) | Self::ObjectId { oid: s } => Ok(s),
            Self::Number(n) => Ok(n.to_string()),
            Self::Date { date } => date.into_plain(),
        }
    }
}

impl WireDate {
    fn into_plain(self) -> AppResult<String> {
        match self {
            Self::Iso(s) => Ok(s),
            Self::Millis(ms) => millis_to_rfc3339(ms),
            Self::NumberLong { number_long } => {
                let ms = number_long.trim().parse::<i64>().map_err(|_| {
                    AppError::normalization(format!("Invalid $numberLong '{number_long}'"))
                })?;
                millis_to_rfc3339(ms)
            }
        }
    }
}

fn millis_to_rfc3339(ms: i64) -> AppResult<String> {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or_else(|| AppError::normalization(format!("Epoch milliseconds out of range: {ms}")))
}

/// Normalize a raw id/timestamp value into a plain string.
///
/// Idempotent: a plain string comes back unchanged, so
/// `normalize(normalize(x)) == normalize(x)`. Any shape not named by
/// [`WireString`] is a `Normalization` error.
pub fn normalize(value: &Value) -> AppResult<String> {
    let wire = WireString::deserialize(value).map_err(|_| {
        AppError::normalization(format!("Unsupported id/date shape: {}", describe(value)))
    })?;
    wire.into_plain()
}

/// Normalize an optional field; absent and `null` are `None`.
pub fn normalize_opt(value: Option<&Value>) -> AppResult<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => normalize(v).map(Some),
    }
}

// Keeps error messages short: we never echo whole documents into logs.
fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "non-integer number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object without $oid/$date",
    }
}
