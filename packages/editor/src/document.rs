//! # Document Handle
//!
//! A Document wraps a single page and its editing state.
//! Documents can be:
//! - **Memory-backed**: Temporary, for testing or in-memory operations
//! - **File-backed**: JSON on disk with dirty tracking
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit → Render → Save
//!   ↓      ↓       ↓       ↓
//! JSON  Mutations HTML   JSON
//! ```

use crate::post_effects::PostEffectEngine;
use crate::transfer;
use crate::{EditorError, Mutation, MutationResult};
use pagecraft_model::Page;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Editable page document
#[derive(Debug)]
pub struct Document {
    /// Path to the page file (empty for memory-backed documents)
    pub path: PathBuf,

    /// Current version number (increments on each successful mutation)
    pub version: u64,

    /// Backing storage strategy
    storage: DocumentStorage,

    effects: PostEffectEngine,
}

/// Storage backend for document
#[derive(Debug)]
pub enum DocumentStorage {
    /// In-memory only (for testing, temp docs)
    Memory { page: Page },

    /// File-backed (single-user editing)
    File { page: Page, dirty: bool },
}

/// Saved document state (see [`Document::checkpoint`])
#[derive(Debug, Clone)]
pub struct Checkpoint {
    page: Page,
    dirty: bool,
    version: u64,
}

impl DocumentStorage {
    /// Mutable page access marks file-backed storage dirty
    fn page_mut(&mut self) -> &mut Page {
        match self {
            DocumentStorage::Memory { page } => page,
            DocumentStorage::File { page, dirty } => {
                *dirty = true;
                page
            }
        }
    }
}

impl Document {
    /// Create a memory-backed document
    pub fn from_page(page: Page) -> Self {
        Self {
            path: PathBuf::new(),
            version: 0,
            storage: DocumentStorage::Memory { page },
            effects: PostEffectEngine::new(),
        }
    }

    /// Create a file-backed document that has not been written yet
    pub fn create(path: impl Into<PathBuf>, page: Page) -> Self {
        Self {
            path: path.into(),
            version: 0,
            storage: DocumentStorage::File { page, dirty: true },
            effects: PostEffectEngine::new(),
        }
    }

    /// Load document from file (file-backed).
    /// Accepts the export envelope or a bare page.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let page = transfer::parse_page(&source)?;

        info!(
            path = %path.display(),
            page = %page.id,
            sections = page.sections.len(),
            "loaded document"
        );

        Ok(Self {
            path: path.to_path_buf(),
            version: 0,
            storage: DocumentStorage::File { page, dirty: false },
            effects: PostEffectEngine::new(),
        })
    }

    pub fn page(&self) -> &Page {
        match &self.storage {
            DocumentStorage::Memory { page } | DocumentStorage::File { page, .. } => page,
        }
    }

    fn page_mut(&mut self) -> &mut Page {
        self.storage.page_mut()
    }

    pub fn is_file_backed(&self) -> bool {
        matches!(self.storage, DocumentStorage::File { .. })
    }

    /// Apply a mutation and its post-effects atomically
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let backup = self.page().clone();
        let was_dirty = self.is_dirty();

        let outcome = self
            .effects
            .apply_with_effects(&mutation, self.storage.page_mut());
        let effects = match outcome {
            Ok(effects) => effects,
            Err(e) => {
                self.restore(backup, was_dirty);
                return Err(e.into());
            }
        };

        self.version += 1;
        debug!(
            mutation = mutation.name(),
            version = self.version,
            effects = effects.len(),
            "applied mutation"
        );

        Ok(MutationResult {
            version: self.version,
            effects,
        })
    }

    /// Swap in a new page (import, undo/redo restore)
    pub fn replace_page(&mut self, page: Page) {
        *self.page_mut() = page;
        self.version += 1;
    }

    /// Run `f` over the page, counting it as one edit
    pub fn edit_page<T>(&mut self, f: impl FnOnce(&mut Page) -> T) -> T {
        let result = f(self.page_mut());
        self.version += 1;
        result
    }

    /// Capture the page, dirty flag and version for [`Document::rollback`]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            page: self.page().clone(),
            dirty: self.is_dirty(),
            version: self.version,
        }
    }

    /// Return to a checkpoint. Not counted as an edit.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.restore(checkpoint.page, checkpoint.dirty);
        self.version = checkpoint.version;
    }

    fn restore(&mut self, backup: Page, was_dirty: bool) {
        match &mut self.storage {
            DocumentStorage::Memory { page } => *page = backup,
            DocumentStorage::File { page, dirty } => {
                *page = backup;
                *dirty = was_dirty;
            }
        }
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty, .. } => *dirty,
            DocumentStorage::Memory { .. } => false,
        }
    }

    /// Save document to disk (if file-backed)
    pub fn save(&mut self) -> Result<(), EditorError> {
        match &mut self.storage {
            DocumentStorage::File { page, dirty } => {
                let json = serde_json::to_string_pretty(page)?;
                if let Some(parent) = self.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                std::fs::write(&self.path, json)?;
                *dirty = false;

                info!(path = %self.path.display(), "saved document");
                Ok(())
            }
            DocumentStorage::Memory { .. } => Err(EditorError::NotFileBacked),
        }
    }
}
