//! `open`: one page of a folder's notes.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use studylib_core::config::AppConfig;
use studylib_core::error::AppError;
use studylib_core::traits::transport::NotesTransport;
use studylib_core::types::{SortDirection, SortKey};
use studylib_entity::material::Material;
use studylib_service::{CatalogQuery, CategoryFilter, ContentsQuery, FolderContents, StudyLibrary};

use crate::output::{self, OutputFormat};

/// Arguments for the open command
#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Folder slug
    pub slug: String,
    /// Case-insensitive search over title, description and tags
    #[arg(short, long)]
    pub search: Option<String>,
    /// Keep notes carrying this tag (repeatable)
    #[arg(short, long)]
    pub tag: Vec<String>,
    /// Keep notes in this category ("all" for every category)
    #[arg(long)]
    pub category: Option<String>,
    /// Page number (1-based)
    #[arg(short, long)]
    pub page: Option<u64>,
    /// Notes per page
    #[arg(short, long)]
    pub limit: Option<u64>,
    /// Sort key: title|name, createdAt|date, lastEditedAt, recent, size
    #[arg(long)]
    pub sort_by: Option<SortKey>,
    /// Sort order: asc or desc
    #[arg(long)]
    pub order: Option<SortDirection>,
}

impl OpenArgs {
    /// Build the contents query these arguments describe
    pub fn query(&self) -> ContentsQuery {
        let mut catalog = CatalogQuery::new()
            .with_search(self.search.clone().unwrap_or_default())
            .with_category(CategoryFilter::parse(self.category.as_deref().unwrap_or("")))
            .sorted_by(self.sort_by.unwrap_or_default(), self.order);
        for tag in &self.tag {
            catalog = catalog.with_tag(tag.clone());
        }
        ContentsQuery {
            catalog,
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Note display row
#[derive(Debug, Serialize, Tabled)]
pub struct MaterialRow {
    /// Note ID
    pub id: String,
    /// Title
    pub title: String,
    /// Tags
    pub tags: String,
    /// Category
    pub category: String,
    /// Last edited
    pub edited: String,
}

impl From<&Material> for MaterialRow {
    fn from(m: &Material) -> Self {
        Self {
            id: m.id.to_string(),
            title: m.title.clone(),
            tags: m.tags.iter().cloned().collect::<Vec<_>>().join(", "),
            category: m.category.clone(),
            edited: m.last_edited_at.clone(),
        }
    }
}

/// Execute the open command
pub async fn execute(
    args: &OpenArgs,
    config: &AppConfig,
    transport: Arc<dyn NotesTransport>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let contents = load(args, config, transport).await?;

    match format {
        OutputFormat::Json => output::print_json(&contents),
        OutputFormat::Table => {
            if contents.degraded {
                output::print_warning("Notes could not be loaded; showing placeholder content.");
            }
            output::print_kv("Folder", &contents.folder.name);
            output::print_kv(
                "Page",
                &format!("{} of {}", contents.page, contents.total_pages),
            );
            output::print_kv("Matches", &contents.total.to_string());
            let rows: Vec<MaterialRow> = contents.materials.iter().map(MaterialRow::from).collect();
            output::print_list(&rows, format);
        }
    }
    Ok(())
}

/// Open the folder and cut the requested page
pub async fn load(
    args: &OpenArgs,
    config: &AppConfig,
    transport: Arc<dyn NotesTransport>,
) -> Result<FolderContents, AppError> {
    let mut library = StudyLibrary::from_config(transport, config);
    library.open(&args.slug).await?;
    library
        .view(&args.query())?
        .ok_or_else(|| AppError::internal("No folder selected after open"))
}
