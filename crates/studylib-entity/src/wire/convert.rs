//! Conversion of wire DTOs into canonical domain records.

use serde_json::Value;
use tracing::warn;

use studylib_core::error::AppError;
use studylib_core::result::AppResult;
use studylib_core::types::{FolderId, MaterialId};

use super::dto::{FolderSummaryDto, NoteDto};
use super::{normalize, normalize_opt};
use crate::folder::{Folder, slugify};
use crate::material::{Material, MaterialOrigin, PLACEHOLDER_TIMESTAMP};

/// Turns DTOs into [`Folder`]s and [`Material`]s.
///
/// In strict mode a malformed id or timestamp fails the conversion with a
/// `Normalization` error. Otherwise the field is replaced by a
/// deterministic placeholder and a warning is logged. Holds no mutable
/// state, so one instance may serve any number of concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    strict: bool,
}

impl Normalizer {
    /// Create a normalizer.
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// Whether malformed fields are errors.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Decode and convert one raw folder summary.
    ///
    /// A summary whose fields have the wrong JSON types is skipped with a
    /// warning (`Ok(None)`), or fails with `Normalization` in strict mode.
    pub fn decode_folder(&self, raw: Value, index: usize) -> AppResult<Option<Folder>> {
        match serde_json::from_value::<FolderSummaryDto>(raw) {
            Ok(dto) => self.folder(dto, index).map(Some),
            Err(e) => {
                self.skip(e, "folder", &format!("folders[{index}]"))?;
                Ok(None)
            }
        }
    }

    /// Decode and convert one raw note; see [`Normalizer::decode_folder`].
    pub fn decode_material(
        &self,
        raw: Value,
        scope: &str,
        index: usize,
    ) -> AppResult<Option<Material>> {
        match serde_json::from_value::<NoteDto>(raw) {
            Ok(dto) => self.material(dto, scope, index).map(Some),
            Err(e) => {
                self.skip(e, "note", &format!("{scope}.notes[{index}]"))?;
                Ok(None)
            }
        }
    }

    /// Convert a folder summary. `index` is its position in the response
    /// and seeds placeholder ids.
    pub fn folder(&self, dto: FolderSummaryDto, index: usize) -> AppResult<Folder> {
        let id = self.required(dto.raw_id(), "folder.id", || {
            format!("invalid-folder-{index}")
        })?;

        let parent_id = match normalize_opt(dto.raw_parent()) {
            Ok(parent) => parent.filter(|p| !p.is_empty()).map(FolderId::from),
            Err(e) => {
                self.degrade(e, "folder.parentId", &id)?;
                None
            }
        };

        let name = dto
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Untitled folder".to_string());
        let slug = dto
            .slug
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| {
                let derived = slugify(&name);
                if derived.is_empty() { id.clone() } else { derived }
            });

        let created_at = self.optional_date(dto.created_at.as_ref(), "folder.createdAt", &id)?;
        let updated_at = self.optional_date(dto.updated_at.as_ref(), "folder.updatedAt", &id)?;

        Ok(Folder {
            id: FolderId::from(id),
            name,
            slug,
            description: dto.description.unwrap_or_default(),
            parent_id,
            material_ids: Vec::new(),
            tags: dto.tags.into_iter().collect(),
            note_count: dto.note_count.unwrap_or(0),
            created_at: created_at.unwrap_or_default(),
            updated_at: updated_at.unwrap_or_default(),
        })
    }

    /// Convert a note. `scope` (usually the folder slug) and `index` seed
    /// placeholder ids.
    pub fn material(&self, dto: NoteDto, scope: &str, index: usize) -> AppResult<Material> {
        let id = self.required(dto.raw_id(), "note.id", || {
            format!("invalid-{scope}-{index}")
        })?;

        let created_at = self
            .optional_date(dto.created_at.as_ref(), "note.createdAt", &id)?
            .unwrap_or_else(|| PLACEHOLDER_TIMESTAMP.to_string());
        let last_edited_at = self
            .optional_date(dto.raw_last_edited(), "note.lastEditedAt", &id)?
            .unwrap_or_else(|| created_at.clone());

        Ok(Material {
            id: MaterialId::from(id),
            title: dto
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "Untitled note".to_string()),
            description: dto.description.or(dto.excerpt).unwrap_or_default(),
            content: dto.content.unwrap_or_default(),
            tags: dto.tags.into_iter().collect(),
            category: dto.category.unwrap_or_default(),
            created_at,
            last_edited_at,
            origin: MaterialOrigin::Remote,
        })
    }

    fn required(
        &self,
        value: Option<&Value>,
        field: &str,
        placeholder: impl FnOnce() -> String,
    ) -> AppResult<String> {
        let result = match value {
            Some(v) => normalize(v),
            None => Err(AppError::normalization(format!("Missing {field}"))),
        };

        match result {
            Ok(id) if !id.is_empty() => Ok(id),
            Ok(_) => {
                let fallback = placeholder();
                self.degrade(AppError::normalization(format!("Empty {field}")), field, &fallback)?;
                Ok(fallback)
            }
            Err(e) => {
                let fallback = placeholder();
                self.degrade(e, field, &fallback)?;
                Ok(fallback)
            }
        }
    }

    fn optional_date(
        &self,
        value: Option<&Value>,
        field: &str,
        owner: &str,
    ) -> AppResult<Option<String>> {
        match normalize_opt(value) {
            Ok(date) => Ok(date),
            Err(e) => {
                self.degrade(e, field, owner)?;
                Ok(Some(PLACEHOLDER_TIMESTAMP.to_string()))
            }
        }
    }

    fn skip(&self, err: serde_json::Error, kind: &str, position: &str) -> AppResult<()> {
        if self.strict {
            return Err(AppError::normalization(format!("Malformed {kind} at {position}: {err}")));
        }
        warn!(kind, position, error = %err, "Skipping malformed item");
        Ok(())
    }

    fn degrade(&self, err: AppError, field: &str, owner: &str) -> AppResult<()> {
        if self.strict {
            return Err(AppError::normalization(format!("{field} of '{owner}': {}", err.message)));
        }
        warn!(field, owner, error = %err.message, "Substituting placeholder for malformed field");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use studylib_core::error::ErrorKind;

    fn note(value: serde_json::Value) -> NoteDto {
        serde_json::from_value(value).expect("note dto")
    }

    fn summary(value: serde_json::Value) -> FolderSummaryDto {
        serde_json::from_value(value).expect("summary dto")
    }

    #[test]
    fn test_material_fields_are_plain() {
        let m = Normalizer::new(true)
            .material(
                note(json!({
                    "_id": {"$oid": "n1"},
                    "title": "React Hooks",
                    "tags": ["react"],
                    "createdAt": {"$date": "2024-01-01T00:00:00Z"},
                    "lastEditedAt": {"$date": 0}
                })),
                "react-dev",
                0,
            )
            .expect("material");
        assert_eq!(m.id.as_str(), "n1");
        assert_eq!(m.created_at, "2024-01-01T00:00:00Z");
        assert_eq!(m.last_edited_at, "1970-01-01T00:00:00.000Z");
        assert!(m.has_tag("react"));
    }

    #[test]
    fn test_last_edited_defaults_to_created() {
        let m = Normalizer::default()
            .material(note(json!({"id": "n", "createdAt": "2024-05-05"})), "s", 0)
            .unwrap();
        assert_eq!(m.last_edited_at, "2024-05-05");
        assert_eq!(m.title, "Untitled note");
    }

    #[test]
    fn test_lenient_mode_substitutes_placeholders() {
        let m = Normalizer::new(false)
            .material(
                note(json!({"id": ["bad"], "title": "T", "createdAt": {"when": 1}})),
                "react-dev",
                4,
            )
            .expect("lenient");
        assert_eq!(m.id.as_str(), "invalid-react-dev-4");
        assert_eq!(m.created_at, PLACEHOLDER_TIMESTAMP);
    }

    #[test]
    fn test_strict_mode_fails_loudly() {
        let err = Normalizer::new(true)
            .material(note(json!({"id": {"oid": "x"}})), "s", 0)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Normalization);

        let err = Normalizer::new(true)
            .folder(summary(json!({"name": "No id"})), 0)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Normalization);
    }

    #[test]
    fn test_folder_summary_conversion() {
        let folder = Normalizer::new(true)
            .folder(
                summary(json!({
                    "_id": 7,
                    "name": "Rust Ownership",
                    "parentId": {"$oid": "root"},
                    "noteCount": 3,
                    "tags": ["rust"]
                })),
                0,
            )
            .unwrap();
        assert_eq!(folder.id.as_str(), "7");
        assert_eq!(folder.slug, "rust-ownership");
        assert_eq!(folder.parent_id, Some(FolderId::from("root")));
        assert_eq!(folder.note_count, 3);
        assert_eq!(folder.created_at, "");
    }

    #[test]
    fn test_both_id_keys_prefer_database_id() {
        let folder = Normalizer::new(true)
            .folder(
                summary(json!({"_id": {"$oid": "f1"}, "id": "virtual", "name": "React Dev"})),
                0,
            )
            .unwrap();
        assert_eq!(folder.id.as_str(), "f1");

        let m = Normalizer::new(true)
            .material(
                note(json!({"_id": {"$oid": "n1"}, "id": "n1", "excerpt": "Short", "tags": null})),
                "s",
                0,
            )
            .unwrap();
        assert_eq!(m.id.as_str(), "n1");
        assert_eq!(m.description, "Short");
        assert!(m.tags.is_empty());
    }

    #[test]
    fn test_decode_skips_mistyped_items_unless_strict() {
        let bad = json!({"_id": "n9", "title": 42});
        let lenient = Normalizer::new(false);
        assert!(lenient.decode_material(bad.clone(), "s", 0).unwrap().is_none());
        assert!(lenient.decode_folder(json!(["not", "an", "object"]), 0).unwrap().is_none());

        let err = Normalizer::new(true).decode_material(bad, "s", 0).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Normalization);

        let good = lenient
            .decode_material(json!({"_id": "n1", "title": "Hooks", "tags": null}), "s", 1)
            .unwrap()
            .expect("decoded");
        assert_eq!(good.title, "Hooks");
    }

    #[test]
    fn test_lenient_parent_becomes_root() {
        let folder = Normalizer::new(false)
            .folder(summary(json!({"id": "c", "name": "Child", "parentId": [1]})), 0)
            .unwrap();
        assert!(folder.is_root());
    }
}
