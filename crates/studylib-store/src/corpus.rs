//! The folder/material corpus.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use studylib_core::config::library::DeletePolicy;
use studylib_core::error::AppError;
use studylib_core::result::AppResult;
use studylib_core::types::{FolderId, MaterialId};
use studylib_entity::folder::{Folder, FolderNode, FolderTree, NewFolder};
use studylib_entity::material::Material;

use crate::seed::CorpusSeed;

/// Result of a folder deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedFolder {
    /// The removed folder record.
    pub folder: Folder,
    /// Direct children moved up to the removed folder's parent.
    pub reparented: Vec<FolderId>,
    /// Material references the folder held (the records stay in the corpus).
    pub detached: Vec<MaterialId>,
}

/// In-memory store of folders and materials.
///
/// Invariants:
/// - every `parent_id` names a folder in the corpus and the parent graph is
///   an acyclic forest;
/// - a folder's `material_ids` has no duplicates and never gains an id
///   through [`Corpus::add_material_to_folder`] unless the record exists;
/// - folders and materials iterate in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    folders: HashMap<FolderId, Folder>,
    folder_order: Vec<FolderId>,
    materials: HashMap<MaterialId, Material>,
    material_order: Vec<MaterialId>,
    delete_policy: DeletePolicy,
}

impl Corpus {
    /// Create an empty corpus.
    pub fn new(delete_policy: DeletePolicy) -> Self {
        Self {
            delete_policy,
            ..Default::default()
        }
    }

    /// Build a corpus from seed data.
    ///
    /// Folders may be listed before their parents. A folder whose parent
    /// never appears (or whose parents form a cycle) is a `Validation`
    /// error.
    pub fn init(seed: CorpusSeed, delete_policy: DeletePolicy) -> AppResult<Self> {
        let mut corpus = Self::new(delete_policy);

        for material in seed.materials {
            corpus.add_material(material)?;
        }

        let mut pending = seed.folders;
        while !pending.is_empty() {
            let before = pending.len();
            let mut deferred = Vec::new();
            for folder in pending {
                let ready = match &folder.parent_id {
                    None => true,
                    Some(parent) => corpus.folders.contains_key(parent),
                };
                if ready {
                    corpus.add_folder(folder)?;
                } else {
                    deferred.push(folder);
                }
            }

            if deferred.len() == before {
                let ids: Vec<String> = deferred.iter().map(|f| f.id.to_string()).collect();
                return Err(AppError::validation(format!(
                    "Folders with unknown parents or cyclic parent links: {}",
                    ids.join(", ")
                )));
            }
            pending = deferred;
        }

        info!(
            folders = corpus.folder_count(),
            materials = corpus.material_count(),
            "Corpus initialized"
        );
        Ok(corpus)
    }

    /// Child-folder policy applied by [`Corpus::delete_folder`].
    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// Number of folders.
    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    /// Number of material records.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// All folders in insertion order.
    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.folder_order.iter().filter_map(|id| self.folders.get(id))
    }

    /// All materials in insertion order.
    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.material_order.iter().filter_map(|id| self.materials.get(id))
    }

    // ── Lookups ────────────────────────────────────────────────

    /// Look up a folder.
    pub fn get_folder_by_id(&self, id: &FolderId) -> Option<&Folder> {
        self.folders.get(id)
    }

    /// Look up a folder by slug (first match in insertion order).
    pub fn get_folder_by_slug(&self, slug: &str) -> Option<&Folder> {
        self.folders().find(|f| f.slug == slug)
    }

    /// Look up a material record.
    pub fn get_material(&self, id: &MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Folders without a parent, in insertion order.
    pub fn root_folders(&self) -> Vec<&Folder> {
        self.folders().filter(|f| f.is_root()).collect()
    }

    /// Direct children of a folder, in insertion order.
    pub fn get_subfolders(&self, id: &FolderId) -> AppResult<Vec<&Folder>> {
        self.require_folder(id)?;
        Ok(self
            .folders()
            .filter(|f| f.parent_id.as_ref() == Some(id))
            .collect())
    }

    /// Resolve a folder's material references, in display order.
    ///
    /// A reference without a record resolves to [`Material::placeholder`].
    pub fn get_folder_materials(&self, id: &FolderId) -> AppResult<Vec<Material>> {
        let folder = self.require_folder(id)?;
        Ok(folder
            .material_ids
            .iter()
            .map(|mid| {
                self.materials.get(mid).cloned().unwrap_or_else(|| {
                    debug!(folder_id = %id, material_id = %mid, "Dangling material reference");
                    Material::placeholder(mid.clone())
                })
            })
            .collect())
    }

    /// Materials carrying `tag` (case-insensitive), in insertion order.
    pub fn get_materials_by_tag(&self, tag: &str) -> Vec<&Material> {
        self.materials().filter(|m| m.has_tag(tag)).collect()
    }

    /// Folders carrying `tag` (case-insensitive), in insertion order.
    pub fn get_folders_by_tag(&self, tag: &str) -> Vec<&Folder> {
        self.folders().filter(|f| f.has_tag(tag)).collect()
    }

    /// Breadcrumb trail from the root down to (and including) `id`.
    pub fn ancestors(&self, id: &FolderId) -> AppResult<Vec<&Folder>> {
        let start = self.require_folder(id)?;
        let mut cursor = start.parent_id.as_ref();
        let mut trail = vec![start];

        while let Some(parent_id) = cursor {
            if trail.len() > self.folders.len() {
                return Err(AppError::internal(format!(
                    "Parent chain of '{id}' does not terminate"
                )));
            }
            let parent = self.require_folder(parent_id)?;
            trail.push(parent);
            cursor = parent.parent_id.as_ref();
        }

        trail.reverse();
        Ok(trail)
    }

    /// Whether `candidate` lies strictly below `ancestor`.
    pub fn is_descendant(&self, candidate: &FolderId, ancestor: &FolderId) -> bool {
        let mut cursor = self.folders.get(candidate).and_then(|f| f.parent_id.as_ref());
        let mut steps = 0;
        while let Some(parent_id) = cursor {
            if parent_id == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.folders.len() {
                return false;
            }
            cursor = self.folders.get(parent_id).and_then(|f| f.parent_id.as_ref());
        }
        false
    }

    /// The whole forest.
    pub fn tree(&self) -> FolderTree {
        let roots: Vec<FolderNode> = self
            .root_folders()
            .into_iter()
            .map(|root| self.build_node(root, 0))
            .collect();
        FolderTree {
            roots,
            total_folders: self.folders.len() as u64,
        }
    }

    /// The subtree rooted at `id`.
    pub fn subtree(&self, id: &FolderId) -> AppResult<FolderNode> {
        let root = self.require_folder(id)?;
        Ok(self.build_node(root, 0))
    }

    fn build_node(&self, folder: &Folder, depth: u32) -> FolderNode {
        let children: Vec<FolderNode> = self
            .folders()
            .filter(|f| f.parent_id.as_ref() == Some(&folder.id))
            .map(|child| self.build_node(child, depth + 1))
            .collect();

        FolderNode {
            id: folder.id.clone(),
            name: folder.name.clone(),
            slug: folder.slug.clone(),
            depth,
            child_count: children.len() as u64,
            material_count: folder.material_ids.len() as u64,
            children,
        }
    }

    // ── Mutations ──────────────────────────────────────────────

    /// Add a folder. Duplicate ids are a `Conflict`; an unknown parent is
    /// `NotFound`.
    pub fn add_folder(&mut self, new: NewFolder) -> AppResult<FolderId> {
        if new.id.as_str().trim().is_empty() {
            return Err(AppError::validation("Folder id cannot be empty"));
        }
        if new.name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }
        if self.folders.contains_key(&new.id) {
            return Err(AppError::conflict(format!(
                "A folder with id '{}' already exists",
                new.id
            )));
        }
        if let Some(parent_id) = &new.parent_id {
            self.require_folder(parent_id)?;
        }

        let folder = new.into_folder();
        let id = folder.id.clone();
        debug!(folder_id = %id, parent = ?folder.parent_id, "Folder added");
        self.insert_folder(folder);
        Ok(id)
    }

    /// Re-parent a folder. Moving a folder under itself or one of its
    /// descendants is a `Validation` error.
    pub fn move_folder(&mut self, id: &FolderId, new_parent: Option<FolderId>) -> AppResult<()> {
        self.require_folder(id)?;

        if let Some(parent_id) = &new_parent {
            self.require_folder(parent_id)?;
            if parent_id == id {
                return Err(AppError::validation("Cannot move a folder into itself"));
            }
            if self.is_descendant(parent_id, id) {
                return Err(AppError::validation(
                    "Cannot move a folder into one of its descendants",
                ));
            }
        }

        if let Some(folder) = self.folders.get_mut(id) {
            folder.parent_id = new_parent;
        }
        Ok(())
    }

    /// Add a material record. Duplicate ids are a `Conflict`.
    pub fn add_material(&mut self, material: Material) -> AppResult<()> {
        if self.materials.contains_key(&material.id) {
            return Err(AppError::conflict(format!(
                "A material with id '{}' already exists",
                material.id
            )));
        }
        self.material_order.push(material.id.clone());
        self.materials.insert(material.id.clone(), material);
        Ok(())
    }

    /// Insert or replace a material record. Returns `true` when the id was new.
    pub fn upsert_material(&mut self, material: Material) -> bool {
        let id = material.id.clone();
        let is_new = self.materials.insert(id.clone(), material).is_none();
        if is_new {
            self.material_order.push(id);
        }
        is_new
    }

    /// Reference a material from a folder. Returns `false` when the
    /// reference already existed.
    pub fn add_material_to_folder(
        &mut self,
        folder_id: &FolderId,
        material_id: &MaterialId,
    ) -> AppResult<bool> {
        if !self.materials.contains_key(material_id) {
            return Err(AppError::not_found(format!(
                "Material '{material_id}' not found"
            )));
        }
        let folder = self.require_folder_mut(folder_id)?;
        if folder.contains(material_id) {
            return Ok(false);
        }
        folder.material_ids.push(material_id.clone());
        Ok(true)
    }

    /// Drop a folder's reference to a material. Returns `false` when there
    /// was no such reference.
    pub fn remove_material_from_folder(
        &mut self,
        folder_id: &FolderId,
        material_id: &MaterialId,
    ) -> AppResult<bool> {
        let folder = self.require_folder_mut(folder_id)?;
        let before = folder.material_ids.len();
        folder.material_ids.retain(|id| id != material_id);
        Ok(folder.material_ids.len() != before)
    }

    /// Delete a folder according to the corpus [`DeletePolicy`].
    ///
    /// Child folders are never left pointing at the removed node: they are
    /// re-parented to its parent, or the deletion is refused with
    /// `Conflict`. Callers holding navigation history must forget the id.
    pub fn delete_folder(&mut self, id: &FolderId) -> AppResult<DeletedFolder> {
        let parent_id = self.require_folder(id)?.parent_id.clone();
        let children: Vec<FolderId> = self
            .folders()
            .filter(|f| f.parent_id.as_ref() == Some(id))
            .map(|f| f.id.clone())
            .collect();

        if !children.is_empty() && self.delete_policy == DeletePolicy::Refuse {
            return Err(AppError::conflict(format!(
                "Folder '{id}' still has {} child folder(s)",
                children.len()
            )));
        }

        for child in &children {
            if let Some(folder) = self.folders.get_mut(child) {
                folder.parent_id = parent_id.clone();
            }
        }

        let folder = self
            .folders
            .remove(id)
            .ok_or_else(|| AppError::not_found(format!("Folder '{id}' not found")))?;
        self.folder_order.retain(|fid| fid != id);

        info!(
            folder_id = %id,
            reparented = children.len(),
            detached = folder.material_ids.len(),
            "Folder deleted"
        );

        Ok(DeletedFolder {
            detached: folder.material_ids.clone(),
            folder,
            reparented: children,
        })
    }

    /// Delete a material: detach it from every folder, then remove the record.
    pub fn delete_material(&mut self, id: &MaterialId) -> AppResult<Material> {
        if !self.materials.contains_key(id) {
            return Err(AppError::not_found(format!("Material '{id}' not found")));
        }

        let mut detached_from = 0usize;
        for folder in self.folders.values_mut() {
            let before = folder.material_ids.len();
            folder.material_ids.retain(|mid| mid != id);
            if folder.material_ids.len() != before {
                detached_from += 1;
            }
        }

        self.material_order.retain(|mid| mid != id);
        let material = self
            .materials
            .remove(id)
            .ok_or_else(|| AppError::not_found(format!("Material '{id}' not found")))?;

        info!(material_id = %id, detached_from, "Material deleted");
        Ok(material)
    }

    // ── Remote ingestion ───────────────────────────────────────

    /// Merge normalized folder summaries into the corpus.
    ///
    /// Known folders keep their material references; their display fields
    /// and parent are refreshed. A summary whose parent is unknown, or
    /// whose parent link would close a cycle, is attached as a root.
    /// Returns the number of summaries merged.
    pub fn ingest_summaries(&mut self, summaries: Vec<Folder>) -> usize {
        let total = summaries.len();
        let mut pending = summaries;

        loop {
            let before = pending.len();
            let mut deferred = Vec::new();
            for folder in pending {
                if self.parent_link_valid(&folder) {
                    self.merge_folder(folder);
                } else {
                    deferred.push(folder);
                }
            }
            if deferred.is_empty() {
                break;
            }
            if deferred.len() == before {
                for mut folder in deferred {
                    warn!(
                        folder_id = %folder.id,
                        parent = ?folder.parent_id,
                        "Folder parent unknown or cyclic; attaching as root"
                    );
                    folder.parent_id = None;
                    self.merge_folder(folder);
                }
                break;
            }
            pending = deferred;
        }

        total
    }

    /// Record fetched folder contents: the folder is merged, every material
    /// is upserted, and the folder's references are replaced by the fetched
    /// order.
    pub fn ingest_contents(&mut self, folder: &Folder, materials: &[Material]) -> AppResult<()> {
        self.ingest_summaries(vec![folder.clone()]);

        let mut ids = Vec::with_capacity(materials.len());
        for material in materials {
            if !ids.contains(&material.id) {
                ids.push(material.id.clone());
            }
            self.upsert_material(material.clone());
        }

        let target = self.require_folder_mut(&folder.id)?;
        target.material_ids = ids;
        Ok(())
    }

    fn parent_link_valid(&self, folder: &Folder) -> bool {
        match &folder.parent_id {
            None => true,
            Some(parent) => {
                parent != &folder.id
                    && self.folders.contains_key(parent)
                    && !self.is_descendant(parent, &folder.id)
            }
        }
    }

    fn merge_folder(&mut self, incoming: Folder) {
        match self.folders.get_mut(&incoming.id) {
            Some(existing) => {
                existing.name = incoming.name;
                existing.slug = incoming.slug;
                existing.description = incoming.description;
                existing.parent_id = incoming.parent_id;
                existing.tags = incoming.tags;
                existing.note_count = incoming.note_count;
                existing.created_at = incoming.created_at;
                existing.updated_at = incoming.updated_at;
            }
            None => self.insert_folder(incoming),
        }
    }

    fn insert_folder(&mut self, folder: Folder) {
        self.folder_order.push(folder.id.clone());
        self.folders.insert(folder.id.clone(), folder);
    }

    fn require_folder(&self, id: &FolderId) -> AppResult<&Folder> {
        self.folders
            .get(id)
            .ok_or_else(|| AppError::not_found(format!("Folder '{id}' not found")))
    }

    fn require_folder_mut(&mut self, id: &FolderId) -> AppResult<&mut Folder> {
        self.folders
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Folder '{id}' not found")))
    }
}
