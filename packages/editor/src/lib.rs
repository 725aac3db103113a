//! # Pagecraft Editor
//!
//! Page editing engine: documents, mutations, history and the store that
//! ties them together for an editor UI.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: sections, settings, pages            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Load/save documents                      │
//! │  - Apply mutations with schema validation   │
//! │  - Post-effects, undo/redo history          │
//! │  - Templates, import/export, A/B tests      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: Page → HTML preview/export   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Page is source of truth**: HTML is a derived view
//! 2. **Mutations are intent**: every edit is a serializable command
//! 3. **Validate before apply**: a rejected edit changes nothing
//! 4. **Optimistic clients**: local state can be discarded and rebuilt
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{PageBuilderStore, TemplateMode};
//! use pagecraft_model::{Page, SectionKind};
//!
//! let mut store = PageBuilderStore::new(Page::new("home", "Home"));
//! store.apply_template_by_id("landing", TemplateMode::Replace)?;
//!
//! let id = store.add_section(SectionKind::Pricing, Some(2))?;
//! store.move_up(&id)?;
//! store.undo()?;
//!
//! let json = store.export_json()?;
//! ```

mod ab_testing;
mod document;
mod errors;
mod history;
mod mutations;
mod pipeline;
mod post_effects;
mod session;
mod store;
mod templates;
pub mod transfer;

pub use ab_testing::{AbTestManager, CONTROL_VARIANT_ID};
pub use document::{Checkpoint, Document, DocumentStorage};
pub use errors::EditorError;
pub use history::{History, HistoryEntry, Snapshot, DEFAULT_MAX_LEVELS};
pub use mutations::{Mutation, MutationError, MutationResult};
pub use pipeline::{Pipeline, PipelineResult};
pub use post_effects::{
    CleanupOrphanedAbTests, ClearDuplicatedAnchor, PostEffect, PostEffectEngine,
};
pub use session::{Cursor, EditSession, PendingMutation, PresenceMap};
pub use store::{PageBuilderStore, TemplateMode, MAX_ZOOM, MIN_ZOOM};
pub use templates::{instantiate_template, TemplateLibrary};
pub use transfer::TransferError;

// Re-export common types for convenience
pub use pagecraft_compiler_html::CompileOptions;
pub use pagecraft_model::{Page, Section};
