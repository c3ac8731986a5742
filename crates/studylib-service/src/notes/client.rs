//! Client for the public notes API.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use tracing::{debug, info, warn};

use studylib_core::config::AppConfig;
use studylib_core::error::{AppError, ErrorKind};
use studylib_core::result::AppResult;
use studylib_core::traits::transport::{NotesTransport, QueryParams};
use studylib_core::types::PageRequest;
use studylib_entity::folder::Folder;
use studylib_entity::material::Material;
use studylib_entity::wire::dto::{ApiEnvelope, FolderContentsData, FolderListData};
use studylib_entity::wire::Normalizer;

use super::synthetic;
use crate::catalog::{self, CatalogQuery};

/// Path of the public folder listing.
pub const FOLDERS_PATH: &str = "/api/public/folders";

/// Path of one folder's contents. The slug is percent-encoded as a single
/// path segment.
pub fn contents_path(slug: &str) -> String {
    format!("{FOLDERS_PATH}/{}", urlencoding::encode(slug))
}

/// Parameters of a folder-contents view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentsQuery {
    /// Filter and ordering.
    pub catalog: CatalogQuery,
    /// 1-based page; defaults to 1.
    pub page: Option<u64>,
    /// Page size; defaults to `library.page_size`.
    pub limit: Option<u64>,
}

impl ContentsQuery {
    pub fn new(catalog: CatalogQuery) -> Self {
        Self {
            catalog,
            ..Default::default()
        }
    }

    pub fn with_page(mut self, page: u64, limit: Option<u64>) -> Self {
        self.page = Some(page);
        self.limit = limit;
        self
    }

    /// Resolve the page request against a default page size.
    pub fn page_request(&self, default_page_size: u64) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(1), self.limit.unwrap_or(default_page_size))
    }
}

/// Every material of one folder, normalized, before any filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderSnapshot {
    pub folder: Folder,
    pub materials: Vec<Material>,
    /// The materials are synthetic stand-ins.
    pub degraded: bool,
}

impl FolderSnapshot {
    /// Run the catalog pipeline over the snapshot.
    pub fn view(&self, query: &ContentsQuery, default_page_size: u64) -> FolderContents {
        let page = catalog::run(
            self.materials.clone(),
            &query.catalog,
            query.page_request(default_page_size),
        );
        FolderContents {
            folder: self.folder.clone(),
            total: page.total_items,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
            materials: page.items,
            degraded: self.degraded,
        }
    }
}

/// One page of a folder's materials.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderContents {
    pub folder: Folder,
    /// Materials on this page.
    pub materials: Vec<Material>,
    /// Materials matching the filter across all pages.
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    /// 0 when nothing matches.
    pub total_pages: u64,
    /// The materials are synthetic stand-ins.
    pub degraded: bool,
}

/// Fetches folder summaries and contents and normalizes them.
///
/// Holds only immutable configuration, the transport and the optional
/// summary cache, so it can be shared behind an `Arc` and called
/// concurrently.
#[derive(Debug, Clone)]
pub struct NotesClient {
    transport: Arc<dyn NotesTransport>,
    normalizer: Normalizer,
    username: String,
    include_note_count: bool,
    fetch_limit: u32,
    timeout: Duration,
    page_size: u64,
    synthetic_count: usize,
    summaries: Option<Cache<String, Arc<Vec<Folder>>>>,
}

impl NotesClient {
    /// Creates a client from configuration.
    pub fn new(transport: Arc<dyn NotesTransport>, config: &AppConfig) -> Self {
        let library = &config.library;
        let summaries = (library.summary_cache_ttl_seconds > 0).then(|| {
            Cache::builder()
                .max_capacity(library.summary_cache_capacity)
                .time_to_live(Duration::from_secs(library.summary_cache_ttl_seconds))
                .build()
        });

        Self {
            transport,
            normalizer: Normalizer::new(library.strict_normalization),
            username: config.api.username.clone(),
            include_note_count: config.api.include_note_count,
            fetch_limit: config.api.fetch_limit,
            timeout: Duration::from_millis(config.api.request_timeout_ms),
            page_size: library.page_size,
            synthetic_count: library.synthetic_count.max(1),
            summaries,
        }
    }

    /// Default page size for contents views.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Lists folder summaries.
    ///
    /// There is no fallback: a transport failure or an unsuccessful
    /// envelope is returned as a `Network` error.
    pub async fn list_folders(&self) -> AppResult<Vec<Folder>> {
        if let Some(cache) = &self.summaries {
            if let Some(hit) = cache.get(&self.username).await {
                debug!(username = %self.username, "Folder summaries served from cache");
                return Ok(hit.as_ref().clone());
            }
        }

        let query: QueryParams = vec![
            ("username".to_string(), self.username.clone()),
            ("includeNoteCount".to_string(), self.include_note_count.to_string()),
        ];
        let body = self
            .bounded(FOLDERS_PATH, self.transport.get_json(FOLDERS_PATH, &query))
            .await
            .map_err(|e| match e.kind {
                ErrorKind::Network => e,
                _ => AppError::network(format!("Folder list unavailable: {}", e.message)),
            })?;

        let envelope: ApiEnvelope<FolderListData> = serde_json::from_value(body)?;
        if !envelope.success {
            return Err(AppError::network(format!(
                "Folder list request failed: {}",
                envelope.reason()
            )));
        }

        let folders = envelope
            .data
            .unwrap_or_default()
            .folders
            .into_iter()
            .enumerate()
            .filter_map(|(i, raw)| self.normalizer.decode_folder(raw, i).transpose())
            .collect::<AppResult<Vec<_>>>()?;

        info!(
            count = folders.len(),
            transport = self.transport.transport_type(),
            "Loaded folder summaries"
        );

        if let Some(cache) = &self.summaries {
            cache
                .insert(self.username.clone(), Arc::new(folders.clone()))
                .await;
        }
        Ok(folders)
    }

    /// Drops cached summaries so the next listing round-trips.
    pub async fn invalidate_summaries(&self) {
        if let Some(cache) = &self.summaries {
            cache.invalidate_all();
            cache.run_pending_tasks().await;
        }
    }

    /// Resolves a folder by slug and returns one page of its materials.
    ///
    /// Only an unknown slug, a failed summary listing, or (in strict mode)
    /// a malformed id/date is an error. Any failure fetching the contents
    /// themselves is served as synthetic materials.
    pub async fn get_folder_contents(
        &self,
        slug: &str,
        query: &ContentsQuery,
    ) -> AppResult<FolderContents> {
        let snapshot = self.fetch_folder(slug).await?;
        Ok(snapshot.view(query, self.page_size))
    }

    /// Resolves a folder by slug and returns all of its normalized
    /// materials.
    pub async fn fetch_folder(&self, slug: &str) -> AppResult<FolderSnapshot> {
        let folder = self
            .list_folders()
            .await?
            .into_iter()
            .find(|f| f.slug == slug)
            .ok_or_else(|| AppError::not_found(format!("Folder '{slug}' not found")))?;
        self.fetch_contents(folder).await
    }

    /// Fetches the materials of an already-resolved folder, skipping the
    /// summary listing. Falls back to synthetic materials like
    /// [`NotesClient::fetch_folder`].
    pub async fn fetch_contents(&self, folder: Folder) -> AppResult<FolderSnapshot> {
        let slug = folder.slug.as_str();
        let failure = match self.fetch_notes(&folder).await {
            Ok(materials) if !materials.is_empty() => {
                info!(slug, count = materials.len(), "Loaded folder contents");
                return Ok(FolderSnapshot {
                    folder,
                    materials,
                    degraded: false,
                });
            }
            Ok(_) => "folder has no notes".to_string(),
            Err(e) if e.kind == ErrorKind::Normalization && self.normalizer.is_strict() => {
                return Err(e);
            }
            Err(e) => e.to_string(),
        };

        warn!(
            slug,
            reason = %failure,
            count = self.synthetic_count,
            "Serving synthetic folder contents"
        );
        let materials = synthetic::synthesize(&folder, self.synthetic_count);
        Ok(FolderSnapshot {
            folder,
            materials,
            degraded: true,
        })
    }

    async fn fetch_notes(&self, folder: &Folder) -> AppResult<Vec<Material>> {
        let path = contents_path(&folder.slug);
        let query: QueryParams = vec![
            ("username".to_string(), self.username.clone()),
            ("page".to_string(), "1".to_string()),
            ("limit".to_string(), self.fetch_limit.to_string()),
        ];

        let body = self
            .bounded(&path, self.transport.get_json(&path, &query))
            .await?;
        let envelope: ApiEnvelope<FolderContentsData> = serde_json::from_value(body)?;
        if !envelope.success {
            return Err(AppError::network(format!(
                "Contents request failed: {}",
                envelope.reason()
            )));
        }

        envelope
            .data
            .unwrap_or_default()
            .notes
            .into_iter()
            .enumerate()
            .filter_map(|(i, raw)| {
                self.normalizer
                    .decode_material(raw, &folder.slug, i)
                    .transpose()
            })
            .collect()
    }

    async fn bounded<T>(
        &self,
        what: &str,
        request: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        tokio::time::timeout(self.timeout, request)
            .await
            .unwrap_or_else(|_| {
                Err(AppError::network(format!(
                    "{what} timed out after {} ms",
                    self.timeout.as_millis()
                )))
            })
    }
}
