//! `folders`: list folder summaries.

use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;

use studylib_core::config::AppConfig;
use studylib_core::error::AppError;
use studylib_core::traits::transport::NotesTransport;
use studylib_entity::folder::Folder;
use studylib_service::NotesClient;

use crate::output::{self, OutputFormat};

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
pub struct FolderRow {
    /// Folder ID
    pub id: String,
    /// Name
    pub name: String,
    /// Slug
    pub slug: String,
    /// Parent folder ID
    pub parent: String,
    /// Reported note count
    pub notes: u64,
}

impl From<&Folder> for FolderRow {
    fn from(f: &Folder) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.name.clone(),
            slug: f.slug.clone(),
            parent: f
                .parent_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string()),
            notes: f.note_count,
        }
    }
}

/// Execute the folders command
pub async fn execute(
    config: &AppConfig,
    transport: Arc<dyn NotesTransport>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let folders = NotesClient::new(transport, config).list_folders().await?;
    let rows: Vec<FolderRow> = folders.iter().map(FolderRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}
