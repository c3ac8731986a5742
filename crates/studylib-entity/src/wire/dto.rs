//! Raw response bodies of the notes service.
//!
//! Id and timestamp fields stay as [`serde_json::Value`] here, and the
//! folder and note lists stay as raw values, so that one malformed note
//! does not fail the whole response; they are decoded by the
//! [`Normalizer`](super::Normalizer) one item and one field at a time.
//!
//! No field uses `#[serde(alias)]`: documents serialized with virtuals
//! carry both `_id` and `id`, and an alias pair in one object is a
//! duplicate-field error. Each spelling gets its own field instead.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `{ success, data, message }` envelope around every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the service considers the call successful.
    #[serde(default)]
    pub success: bool,
    /// Payload, present on success.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Status message.
    #[serde(default)]
    pub message: Option<String>,
    /// Error text, sent instead of `message` by some endpoints.
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Why the call failed, from `message` or `error`.
    pub fn reason(&self) -> &str {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or("unknown error")
    }
}

/// `data` of `GET /api/public/folders`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderListData {
    /// Raw folder summaries, decoded one by one.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub folders: Vec<Value>,
}

/// One folder summary as sent by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderSummaryDto {
    /// Database id in any wire shape.
    #[serde(default, rename = "_id")]
    pub mongo_id: Option<Value>,
    /// Virtual or numeric id in any wire shape.
    #[serde(default)]
    pub id: Option<Value>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// URL slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Parent folder id in any wire shape.
    #[serde(default)]
    pub parent_id: Option<Value>,
    /// Parent folder id under its short key.
    #[serde(default)]
    pub parent: Option<Value>,
    /// Tags.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    /// Note count, when `includeNoteCount=true`.
    #[serde(default)]
    pub note_count: Option<u64>,
    /// Creation timestamp in any wire shape.
    #[serde(default)]
    pub created_at: Option<Value>,
    /// Update timestamp in any wire shape.
    #[serde(default)]
    pub updated_at: Option<Value>,
}

impl FolderSummaryDto {
    /// `_id` when present, else `id`.
    pub fn raw_id(&self) -> Option<&Value> {
        first_present(&self.mongo_id, &self.id)
    }

    /// `parentId` when present, else `parent`.
    pub fn raw_parent(&self) -> Option<&Value> {
        first_present(&self.parent_id, &self.parent)
    }
}

/// `data` of `GET /api/public/folders/:slug`: the folder's own fields
/// plus its notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderContentsData {
    /// Folder fields, flattened into the same object.
    #[serde(flatten)]
    pub folder: FolderSummaryDto,
    /// Raw notes, decoded one by one.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: Vec<Value>,
}

/// One note as sent by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDto {
    /// Database id in any wire shape.
    #[serde(default, rename = "_id")]
    pub mongo_id: Option<Value>,
    /// Virtual or numeric id in any wire shape.
    #[serde(default)]
    pub id: Option<Value>,
    /// Title.
    #[serde(default)]
    pub title: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Excerpt, used when there is no description.
    #[serde(default)]
    pub excerpt: Option<String>,
    /// HTML body.
    #[serde(default)]
    pub content: Option<String>,
    /// Tags.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    /// Category.
    #[serde(default)]
    pub category: Option<String>,
    /// Creation timestamp in any wire shape.
    #[serde(default)]
    pub created_at: Option<Value>,
    /// Last-edit timestamp in any wire shape.
    #[serde(default)]
    pub last_edited_at: Option<Value>,
    /// Document update timestamp, used when there is no last-edit time.
    #[serde(default)]
    pub updated_at: Option<Value>,
}

impl NoteDto {
    /// `_id` when present, else `id`.
    pub fn raw_id(&self) -> Option<&Value> {
        first_present(&self.mongo_id, &self.id)
    }

    /// `lastEditedAt` when present, else `updatedAt`.
    pub fn raw_last_edited(&self) -> Option<&Value> {
        first_present(&self.last_edited_at, &self.updated_at)
    }
}

fn first_present<'a>(preferred: &'a Option<Value>, fallback: &'a Option<Value>) -> Option<&'a Value> {
    preferred
        .as_ref()
        .filter(|v| !v.is_null())
        .or(fallback.as_ref())
}

// `#[serde(default)]` only covers a missing key; `null` needs this.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
