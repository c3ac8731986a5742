//! Seed data for building a corpus.

use serde::{Deserialize, Serialize};

use studylib_entity::folder::NewFolder;
use studylib_entity::material::Material;

/// Initial folders and materials. Folders may be listed in any order;
/// parents are resolved when the corpus is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusSeed {
    /// Folders to insert.
    #[serde(default)]
    pub folders: Vec<NewFolder>,
    /// Materials to insert.
    #[serde(default)]
    pub materials: Vec<Material>,
}

impl CorpusSeed {
    /// Empty seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a folder.
    pub fn folder(mut self, folder: NewFolder) -> Self {
        self.folders.push(folder);
        self
    }

    /// Add a material.
    pub fn material(mut self, material: Material) -> Self {
        self.materials.push(material);
        self
    }

    /// Parse a seed from JSON.
    pub fn from_json(json: &str) -> studylib_core::AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
