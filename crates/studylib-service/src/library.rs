//! The Study Library facade: corpus, navigation and remote contents.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info};

use studylib_core::config::AppConfig;
use studylib_core::error::AppError;
use studylib_core::result::AppResult;
use studylib_core::traits::transport::NotesTransport;
use studylib_core::types::{FolderId, MaterialId};
use studylib_entity::folder::Folder;
use studylib_entity::material::Material;
use studylib_store::{Corpus, DeletedFolder};

use crate::navigation::{FetchTicket, NavigationHistory, RequestTracker};
use crate::notes::{ContentsQuery, FolderContents, FolderSnapshot, NotesClient};

/// What [`StudyLibrary::apply`] did with a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The contents were merged into the corpus.
    Applied,
    /// The ticket was superseded, cancelled, or its folder is no longer
    /// selected; the result was dropped.
    Stale,
}

/// Single-user library session.
///
/// The corpus is owned here and only changes through `&mut self`, so no
/// locking is involved. Network work is split in two: [`fetch`] returns
/// an owned future that may run while other fetches are outstanding, and
/// [`apply`] merges a finished result only if it is still wanted.
///
/// [`fetch`]: StudyLibrary::fetch
/// [`apply`]: StudyLibrary::apply
#[derive(Debug)]
pub struct StudyLibrary {
    client: Arc<NotesClient>,
    corpus: Corpus,
    history: NavigationHistory,
    tracker: RequestTracker,
    degraded: HashSet<FolderId>,
}

impl StudyLibrary {
    /// Creates a library over an existing corpus.
    pub fn new(client: Arc<NotesClient>, corpus: Corpus) -> Self {
        Self {
            client,
            corpus,
            history: NavigationHistory::new(),
            tracker: RequestTracker::new(),
            degraded: HashSet::new(),
        }
    }

    /// Creates a library with an empty corpus from configuration.
    pub fn from_config(transport: Arc<dyn NotesTransport>, config: &AppConfig) -> Self {
        Self::new(
            Arc::new(NotesClient::new(transport, config)),
            Corpus::new(config.library.delete_policy),
        )
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn client(&self) -> &Arc<NotesClient> {
        &self.client
    }

    /// The selected folder, `None` at the root.
    pub fn current_folder(&self) -> Option<&Folder> {
        self.history
            .current()
            .and_then(|id| self.corpus.get_folder_by_id(id))
    }

    /// Root-to-current trail of the selected folder.
    pub fn breadcrumbs(&self) -> Vec<&Folder> {
        self.history
            .current()
            .and_then(|id| self.corpus.ancestors(id).ok())
            .unwrap_or_default()
    }

    /// Children of the selected folder, or the roots at the root.
    pub fn subfolders(&self) -> Vec<&Folder> {
        match self.history.current() {
            Some(id) => self.corpus.get_subfolders(id).unwrap_or_default(),
            None => self.corpus.root_folders(),
        }
    }

    /// Reloads folder summaries into the corpus.
    pub async fn refresh_folders(&mut self) -> AppResult<usize> {
        let folders = self.client.list_folders().await?;
        let merged = self.corpus.ingest_summaries(folders);
        info!(merged, total = self.corpus.folder_count(), "Folder summaries refreshed");
        Ok(merged)
    }

    /// Select a folder by slug and issue a ticket for its contents.
    ///
    /// Re-selecting the current folder leaves the history untouched but
    /// still issues a fresh ticket, superseding any in-flight fetch.
    pub fn select_folder(&mut self, slug: &str) -> AppResult<FetchTicket> {
        let id = self
            .corpus
            .get_folder_by_slug(slug)
            .map(|f| f.id.clone())
            .ok_or_else(|| AppError::not_found(format!("Folder '{slug}' not found")))?;

        let previous = self.history.current().cloned();
        if self.history.select(Some(id)) {
            self.leave(previous.as_ref());
            info!(slug, "Folder selected");
        }
        Ok(self.tracker.issue(slug))
    }

    /// Return to the library root.
    pub fn select_root(&mut self) {
        let previous = self.history.current().cloned();
        if self.history.select(None) {
            self.leave(previous.as_ref());
        }
    }

    /// Step back in history; returns a ticket when the new position is a
    /// folder.
    pub fn back(&mut self) -> Option<FetchTicket> {
        let previous = self.history.current().cloned();
        if !self.history.back() {
            return None;
        }
        self.leave(previous.as_ref());
        self.issue_for_current()
    }

    /// Step forward in history; returns a ticket when the new position is
    /// a folder.
    pub fn forward(&mut self) -> Option<FetchTicket> {
        let previous = self.history.current().cloned();
        if !self.history.forward() {
            return None;
        }
        self.leave(previous.as_ref());
        self.issue_for_current()
    }

    /// Owned future resolving the contents named by `ticket`. It borrows
    /// nothing from `self`, so several may be outstanding at once.
    ///
    /// A folder already in the corpus is fetched directly; only an unknown
    /// slug goes through the summary listing first.
    pub fn fetch(
        &self,
        ticket: &FetchTicket,
    ) -> impl Future<Output = AppResult<FolderSnapshot>> + Send + use<> {
        let client = Arc::clone(&self.client);
        let slug = ticket.slug().to_string();
        let known = self.corpus.get_folder_by_slug(&slug).cloned();
        async move {
            match known {
                Some(folder) => client.fetch_contents(folder).await,
                None => client.fetch_folder(&slug).await,
            }
        }
    }

    /// Merge a fetch result if `ticket` is still the latest one for its
    /// folder and that folder is still selected.
    ///
    /// Stale results are dropped whether they succeeded or not. Errors of
    /// a current ticket are returned.
    pub fn apply(
        &mut self,
        ticket: &FetchTicket,
        result: AppResult<FolderSnapshot>,
    ) -> AppResult<ApplyOutcome> {
        let selected = self
            .current_folder()
            .is_some_and(|f| f.slug == ticket.slug());
        if !selected || !self.tracker.is_latest(ticket) {
            debug!(
                slug = ticket.slug(),
                generation = ticket.generation(),
                "Discarding stale folder contents"
            );
            return Ok(ApplyOutcome::Stale);
        }
        self.tracker.cancel(ticket.slug());

        let snapshot = result?;
        self.corpus
            .ingest_contents(&snapshot.folder, &snapshot.materials)?;
        if snapshot.degraded {
            self.degraded.insert(snapshot.folder.id.clone());
        } else {
            self.degraded.remove(&snapshot.folder.id);
        }

        info!(
            slug = ticket.slug(),
            generation = ticket.generation(),
            materials = snapshot.materials.len(),
            degraded = snapshot.degraded,
            "Applied folder contents"
        );
        Ok(ApplyOutcome::Applied)
    }

    /// Select, fetch and apply in one step, loading summaries first if
    /// the slug is not known yet.
    pub async fn open(&mut self, slug: &str) -> AppResult<ApplyOutcome> {
        if self.corpus.get_folder_by_slug(slug).is_none() {
            self.refresh_folders().await?;
        }
        let ticket = self.select_folder(slug)?;
        let result = self.fetch(&ticket).await;
        self.apply(&ticket, result)
    }

    /// One page of the selected folder's materials from the corpus.
    /// `None` at the root.
    pub fn view(&self, query: &ContentsQuery) -> AppResult<Option<FolderContents>> {
        match self.current_folder() {
            Some(folder) => self.contents_of(&folder.slug, query).map(Some),
            None => Ok(None),
        }
    }

    /// One page of any known folder's materials from the corpus.
    pub fn contents_of(&self, slug: &str, query: &ContentsQuery) -> AppResult<FolderContents> {
        let folder = self
            .corpus
            .get_folder_by_slug(slug)
            .ok_or_else(|| AppError::not_found(format!("Folder '{slug}' not found")))?;
        let snapshot = FolderSnapshot {
            materials: self.corpus.get_folder_materials(&folder.id)?,
            degraded: self.degraded.contains(&folder.id),
            folder: folder.clone(),
        };
        Ok(snapshot.view(query, self.client.page_size()))
    }

    /// Delete a folder under the corpus delete policy and drop it from
    /// navigation.
    pub fn delete_folder(&mut self, id: &FolderId) -> AppResult<DeletedFolder> {
        let deleted = self.corpus.delete_folder(id)?;
        self.history.forget(id);
        self.tracker.cancel(&deleted.folder.slug);
        self.degraded.remove(id);
        info!(
            folder_id = %id,
            reparented = deleted.reparented.len(),
            "Folder removed from library"
        );
        Ok(deleted)
    }

    /// Delete a material from every folder and from the corpus.
    pub fn delete_material(&mut self, id: &MaterialId) -> AppResult<Material> {
        self.corpus.delete_material(id)
    }

    fn leave(&mut self, previous: Option<&FolderId>) {
        let Some(slug) = previous
            .and_then(|id| self.corpus.get_folder_by_id(id))
            .map(|f| f.slug.clone())
        else {
            return;
        };
        if self.tracker.cancel(&slug) {
            debug!(slug, "Cancelled in-flight fetch after navigating away");
        }
    }

    fn issue_for_current(&mut self) -> Option<FetchTicket> {
        let slug = self.current_folder()?.slug.clone();
        Some(self.tracker.issue(&slug))
    }
}
