//! # Page Builder Store
//!
//! Editor-facing state: the document, its history, selection, device
//! preview and zoom. Every edit goes through [`PageBuilderStore::apply`],
//! which snapshots the page, applies the mutation and records history.
//!
//! A failed mutation leaves both the page and the history untouched.

use crate::history::{History, Snapshot};
use crate::templates::{instantiate_sections, instantiate_template, TemplateLibrary};
use crate::transfer;
use crate::{Document, EditorError, Mutation, MutationError, MutationResult};
use pagecraft_compiler_html::{compile_to_html, CompileOptions};
use pagecraft_common::IdGenerator;
use pagecraft_model::{
    AnimationSettings, BreakpointSettings, Device, GlobalStyles, Page, PageMeta, Section,
    SectionContent, SectionKind, SectionSettings, Template,
};
use pagecraft_schema::{validate_page, ValidateOptions, ValidationReport};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

pub const MIN_ZOOM: u16 = 25;
pub const MAX_ZOOM: u16 = 200;

/// How a template is combined with the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateMode {
    /// Drop existing sections (and adopt the template theme)
    #[default]
    Replace,
    /// Add the template sections after the existing ones
    Append,
}

#[derive(Debug)]
pub struct PageBuilderStore {
    document: Document,
    history: History,
    templates: TemplateLibrary,
    selection: Option<String>,
    device: Device,
    preview: bool,
    zoom: u16,
    ids: IdGenerator,
}

impl PageBuilderStore {
    /// Store over a memory-backed page with the default history depth
    pub fn new(page: Page) -> Self {
        Self::from_document(Document::from_page(page), History::new())
    }

    pub fn from_document(document: Document, history: History) -> Self {
        let ids = IdGenerator::new(&format!("page:{}", document.page().id));
        Self {
            document,
            history,
            templates: TemplateLibrary::builtin(),
            selection: None,
            device: Device::default(),
            preview: false,
            zoom: 100,
            ids,
        }
    }

    /// Replace the default history depth (0 = unlimited)
    pub fn with_history_limit(mut self, max_levels: usize) -> Self {
        self.history = History::with_max_levels(max_levels);
        self
    }

    pub fn with_templates(mut self, templates: TemplateLibrary) -> Self {
        self.templates = templates;
        self
    }

    pub fn page(&self) -> &Page {
        self.document.page()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn templates(&self) -> &TemplateLibrary {
        &self.templates
    }

    pub fn templates_mut(&mut self) -> &mut TemplateLibrary {
        &mut self.templates
    }

    pub fn version(&self) -> u64 {
        self.document.version
    }

    /// Fresh id that is not used by any section of the page
    pub fn next_id(&mut self) -> String {
        let page = self.document.page();
        self.ids.new_id_avoiding(page.sections.iter().map(|s| s.id.as_str()))
    }

    // Mutations

    /// Apply a mutation and record it in history
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let description = mutation.name();
        self.apply_described(mutation, description)
    }

    pub fn apply_described(
        &mut self,
        mutation: Mutation,
        description: &str,
    ) -> Result<MutationResult, EditorError> {
        let before = Snapshot::capture(self.document.page())?;
        let result = self.document.apply(mutation)?;
        self.history.record(before, Some(description));
        self.reconcile_selection();
        Ok(result)
    }

    /// Apply a mutation without recording history (analytics counters)
    pub fn apply_untracked(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let result = self.document.apply(mutation)?;
        self.reconcile_selection();
        Ok(result)
    }

    /// Apply several mutations as one undo step. Either all apply or none do.
    pub fn apply_all(
        &mut self,
        mutations: Vec<Mutation>,
        description: &str,
    ) -> Result<Vec<MutationResult>, EditorError> {
        let before = Snapshot::capture(self.document.page())?;
        let checkpoint = self.document.checkpoint();
        let mut results = Vec::with_capacity(mutations.len());

        for mutation in mutations {
            match self.document.apply(mutation) {
                Ok(result) => results.push(result),
                Err(e) => {
                    self.document.rollback(checkpoint);
                    return Err(e);
                }
            }
        }

        if !results.is_empty() {
            self.history.record(before, Some(description));
        }
        self.reconcile_selection();
        Ok(results)
    }

    /// Add a section with starter content; the new section is selected
    pub fn add_section(
        &mut self,
        kind: SectionKind,
        index: Option<usize>,
    ) -> Result<String, EditorError> {
        let id = self.next_id();
        self.insert_section(Section::new(id, kind), index)
    }

    /// Insert a prepared section (an empty id gets a fresh one); it becomes selected
    pub fn insert_section(
        &mut self,
        mut section: Section,
        index: Option<usize>,
    ) -> Result<String, EditorError> {
        if section.id.trim().is_empty() {
            section.id = self.next_id();
        }
        let id = section.id.clone();
        self.apply(Mutation::AddSection { section, index })?;
        self.selection = Some(id.clone());
        Ok(id)
    }

    pub fn remove_section(&mut self, section_id: &str) -> Result<(), EditorError> {
        self.apply(Mutation::RemoveSection {
            section_id: section_id.to_string(),
        })?;
        Ok(())
    }

    pub fn move_section(&mut self, section_id: &str, index: usize) -> Result<(), EditorError> {
        self.apply(Mutation::MoveSection {
            section_id: section_id.to_string(),
            index,
        })?;
        Ok(())
    }

    /// Move one slot up. Returns false when already first.
    pub fn move_up(&mut self, section_id: &str) -> Result<bool, EditorError> {
        let pos = self.position(section_id)?;
        if pos == 0 {
            return Ok(false);
        }
        self.move_section(section_id, pos - 1)?;
        Ok(true)
    }

    /// Move one slot down. Returns false when already last.
    pub fn move_down(&mut self, section_id: &str) -> Result<bool, EditorError> {
        let pos = self.position(section_id)?;
        if pos + 1 >= self.page().sections.len() {
            return Ok(false);
        }
        self.move_section(section_id, pos + 1)?;
        Ok(true)
    }

    /// Duplicate a section right after itself; the copy is selected
    pub fn duplicate_section(&mut self, section_id: &str) -> Result<String, EditorError> {
        let new_id = self.next_id();
        self.apply(Mutation::DuplicateSection {
            section_id: section_id.to_string(),
            new_id: new_id.clone(),
        })?;
        self.selection = Some(new_id.clone());
        Ok(new_id)
    }

    pub fn update_content(
        &mut self,
        section_id: &str,
        content: SectionContent,
    ) -> Result<(), EditorError> {
        self.apply(Mutation::UpdateContent {
            section_id: section_id.to_string(),
            content,
        })?;
        Ok(())
    }

    pub fn update_settings(
        &mut self,
        section_id: &str,
        settings: SectionSettings,
    ) -> Result<(), EditorError> {
        self.apply(Mutation::UpdateSettings {
            section_id: section_id.to_string(),
            settings,
        })?;
        Ok(())
    }

    pub fn set_responsive(
        &mut self,
        section_id: &str,
        device: Device,
        settings: BreakpointSettings,
    ) -> Result<(), EditorError> {
        self.apply(Mutation::SetResponsive {
            section_id: section_id.to_string(),
            device,
            settings,
        })?;
        Ok(())
    }

    pub fn set_animation(
        &mut self,
        section_id: &str,
        animation: AnimationSettings,
    ) -> Result<(), EditorError> {
        self.apply(Mutation::SetAnimation {
            section_id: section_id.to_string(),
            animation,
        })?;
        Ok(())
    }

    /// Flip global visibility; returns the new value
    pub fn toggle_visibility(&mut self, section_id: &str) -> Result<bool, EditorError> {
        let visible = !self.section(section_id)?.visible;
        self.apply(Mutation::SetVisibility {
            section_id: section_id.to_string(),
            visible,
        })?;
        Ok(visible)
    }

    pub fn set_locked(&mut self, section_id: &str, locked: bool) -> Result<(), EditorError> {
        self.apply(Mutation::SetLocked {
            section_id: section_id.to_string(),
            locked,
        })?;
        Ok(())
    }

    pub fn rename_section(&mut self, section_id: &str, name: &str) -> Result<(), EditorError> {
        self.apply(Mutation::RenameSection {
            section_id: section_id.to_string(),
            name: name.to_string(),
        })?;
        Ok(())
    }

    pub fn update_meta(&mut self, meta: PageMeta) -> Result<(), EditorError> {
        self.apply(Mutation::UpdateMeta { meta })?;
        Ok(())
    }

    pub fn update_global_styles(&mut self, styles: GlobalStyles) -> Result<(), EditorError> {
        self.apply(Mutation::UpdateGlobalStyles { styles })?;
        Ok(())
    }

    // Selection and viewport

    pub fn select(&mut self, section_id: &str) -> Result<(), EditorError> {
        self.section(section_id)?;
        self.selection = Some(section_id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn selected_section(&self) -> Option<&Section> {
        self.selection
            .as_deref()
            .and_then(|id| self.page().find_section(id))
    }

    pub fn set_device(&mut self, device: Device) {
        self.device = device;
    }

    pub fn device(&self) -> Device {
        self.device
    }

    /// Flip preview mode; returns the new value
    pub fn toggle_preview(&mut self) -> bool {
        self.preview = !self.preview;
        self.preview
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    /// Set zoom in percent, clamped to 25..=200. Returns the applied value.
    pub fn set_zoom(&mut self, percent: u16) -> u16 {
        self.zoom = percent.clamp(MIN_ZOOM, MAX_ZOOM);
        self.zoom
    }

    pub fn zoom(&self) -> u16 {
        self.zoom
    }

    // History

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        self.history.end_batch();
        if !self.history.can_undo() {
            return Ok(false);
        }
        let history = &mut self.history;
        let undone = self.document.edit_page(|page| history.undo(page))?;
        self.reconcile_selection();
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        self.history.end_batch();
        if !self.history.can_redo() {
            return Ok(false);
        }
        let history = &mut self.history;
        let redone = self.document.edit_page(|page| history.redo(page))?;
        self.reconcile_selection();
        Ok(redone)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Group the following mutations into one undo step
    pub fn begin_batch(&mut self, description: &str) {
        self.history.begin_batch(Some(description));
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    // Templates

    /// Apply a template; returns the ids of the inserted sections
    pub fn apply_template(
        &mut self,
        template: &Template,
        mode: TemplateMode,
    ) -> Result<Vec<String>, EditorError> {
        let page = self.document.page();
        // Replaced sections give up their anchors; ids stay distinct for undo
        let fresh = match mode {
            TemplateMode::Replace => {
                instantiate_sections(template, &mut self.ids, page, HashSet::new())
            }
            TemplateMode::Append => instantiate_template(template, &mut self.ids, page),
        };
        let ids: Vec<String> = fresh.iter().map(|s| s.id.clone()).collect();

        let mut mutations = Vec::new();
        match mode {
            TemplateMode::Replace => {
                mutations.push(Mutation::ReplaceSections { sections: fresh });
                if let Some(styles) = &template.global_styles {
                    mutations.push(Mutation::UpdateGlobalStyles {
                        styles: styles.clone(),
                    });
                }
            }
            TemplateMode::Append => {
                let mut sections = self.page().sections.clone();
                sections.extend(fresh);
                mutations.push(Mutation::ReplaceSections { sections });
            }
        }

        self.apply_all(mutations, &format!("Apply template {}", template.name))?;

        info!(
            template = %template.id,
            mode = ?mode,
            sections = ids.len(),
            "applied template"
        );
        Ok(ids)
    }

    /// Apply a template from the store's library
    pub fn apply_template_by_id(
        &mut self,
        template_id: &str,
        mode: TemplateMode,
    ) -> Result<Vec<String>, EditorError> {
        let template = self
            .templates
            .get(template_id)
            .cloned()
            .ok_or_else(|| EditorError::TemplateNotFound(template_id.to_string()))?;
        self.apply_template(&template, mode)
    }

    // Import / export

    pub fn export_json(&self) -> Result<String, EditorError> {
        Ok(transfer::export_json(self.page())?)
    }

    /// Replace the whole page with an imported one (undoable)
    pub fn import_json(&mut self, source: &str) -> Result<(), EditorError> {
        let page = transfer::import_json(source)?;
        let before = Snapshot::capture(self.document.page())?;

        self.document.replace_page(page);
        self.history.record(before, Some("Import page"));
        self.reconcile_selection();
        Ok(())
    }

    pub fn export_html(&self, options: &CompileOptions) -> Result<String, EditorError> {
        Ok(compile_to_html(self.page(), options)?)
    }

    /// Preview HTML for the current device
    pub fn preview_html(&self) -> Result<String, EditorError> {
        let options = CompileOptions {
            device: Some(self.device),
            ..CompileOptions::default()
        };
        self.export_html(&options)
    }

    /// Full validation report (errors, warnings and info)
    pub fn validate(&self) -> ValidationReport {
        validate_page(self.page(), &ValidateOptions::default())
    }

    pub fn save(&mut self) -> Result<(), EditorError> {
        self.document.save()
    }

    pub fn is_dirty(&self) -> bool {
        self.document.is_dirty()
    }

    fn section(&self, section_id: &str) -> Result<&Section, EditorError> {
        self.page()
            .find_section(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()).into())
    }

    fn position(&self, section_id: &str) -> Result<usize, EditorError> {
        self.page()
            .position_of(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()).into())
    }

    fn reconcile_selection(&mut self) {
        if let Some(id) = &self.selection {
            if !self.document.page().contains_section(id) {
                self.selection = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::AnimationKind;

    fn store() -> PageBuilderStore {
        PageBuilderStore::new(Page::new("home", "Home"))
    }

    #[test]
    fn test_add_section_selects_it() {
        let mut store = store();
        let id = store.add_section(SectionKind::Hero, None).unwrap();

        assert_eq!(store.selection(), Some(id.as_str()));
        assert_eq!(store.page().sections.len(), 1);
        assert!(store.can_undo());
    }

    #[test]
    fn test_failed_mutation_leaves_history_untouched() {
        let mut store = store();
        store.add_section(SectionKind::Hero, None).unwrap();
        let levels = store.history().undo_levels();
        let version = store.version();

        let result = store.update_content("missing", SectionContent::default_for(SectionKind::Hero));
        assert!(result.is_err());
        assert_eq!(store.history().undo_levels(), levels);
        assert_eq!(store.version(), version);
    }

    #[test]
    fn test_remove_clears_selection() {
        let mut store = store();
        let id = store.add_section(SectionKind::Faq, None).unwrap();
        store.remove_section(&id).unwrap();
        assert_eq!(store.selection(), None);
    }

    #[test]
    fn test_undo_clears_stale_selection() {
        let mut store = store();
        store.add_section(SectionKind::Faq, None).unwrap();
        assert!(store.selection().is_some());

        assert!(store.undo().unwrap());
        assert_eq!(store.selection(), None);
        assert!(store.page().sections.is_empty());

        assert!(store.redo().unwrap());
        assert_eq!(store.page().sections.len(), 1);
    }

    #[test]
    fn test_move_up_and_down() {
        let mut store = store();
        let a = store.add_section(SectionKind::Hero, None).unwrap();
        let b = store.add_section(SectionKind::Faq, None).unwrap();

        assert!(!store.move_up(&a).unwrap());
        assert!(store.move_down(&a).unwrap());
        assert_eq!(store.page().section_ids(), vec![b.as_str(), a.as_str()]);
        assert!(!store.move_down(&a).unwrap());
    }

    #[test]
    fn test_duplicate_selects_copy() {
        let mut store = store();
        let id = store.add_section(SectionKind::Cta, None).unwrap();
        let copy = store.duplicate_section(&id).unwrap();

        assert_ne!(id, copy);
        assert_eq!(store.selection(), Some(copy.as_str()));
        assert_eq!(store.page().position_of(&copy), Some(1));
    }

    #[test]
    fn test_select_unknown_section() {
        let mut store = store();
        assert!(matches!(
            store.select("nope"),
            Err(EditorError::Mutation(MutationError::SectionNotFound(_)))
        ));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut store = store();
        assert_eq!(store.set_zoom(10), MIN_ZOOM);
        assert_eq!(store.set_zoom(500), MAX_ZOOM);
        assert_eq!(store.set_zoom(150), 150);
    }

    #[test]
    fn test_toggle_preview_and_visibility() {
        let mut store = store();
        assert!(store.toggle_preview());
        assert!(!store.toggle_preview());

        let id = store.add_section(SectionKind::Stats, None).unwrap();
        assert!(!store.toggle_visibility(&id).unwrap());
        assert!(store.toggle_visibility(&id).unwrap());
    }

    #[test]
    fn test_batch_is_one_undo_step() {
        let mut store = store();
        store.begin_batch("Build page");
        store.add_section(SectionKind::Hero, None).unwrap();
        store.add_section(SectionKind::Faq, None).unwrap();
        store.end_batch();

        assert_eq!(store.history().undo_levels(), 1);
        store.undo().unwrap();
        assert!(store.page().sections.is_empty());
    }

    #[test]
    fn test_apply_template_replace_and_append() {
        let mut store = store();
        store.add_section(SectionKind::RichText, None).unwrap();

        let ids = store
            .apply_template_by_id("landing", TemplateMode::Replace)
            .unwrap();
        assert_eq!(store.page().section_ids(), ids.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(store.selection(), None);

        let appended = store
            .apply_template_by_id("about", TemplateMode::Append)
            .unwrap();
        assert_eq!(store.page().sections.len(), ids.len() + appended.len());

        // One history entry per template application
        store.undo().unwrap();
        assert_eq!(store.page().sections.len(), ids.len());
    }

    #[test]
    fn test_replace_template_keeps_its_anchors() {
        let mut store = store();
        let anchors = |store: &PageBuilderStore| -> Vec<String> {
            store
                .page()
                .sections
                .iter()
                .filter_map(|s| s.settings.anchor_id.clone())
                .collect()
        };

        store
            .apply_template_by_id("landing", TemplateMode::Replace)
            .unwrap();
        let first = anchors(&store);
        assert!(!first.is_empty());

        store
            .apply_template_by_id("landing", TemplateMode::Replace)
            .unwrap();
        assert_eq!(anchors(&store), first);

        // Appending the same template again still drops the colliding anchors
        store
            .apply_template_by_id("landing", TemplateMode::Append)
            .unwrap();
        assert_eq!(anchors(&store), first);
        assert!(store.export_json().is_ok());
    }

    #[test]
    fn test_failed_apply_all_is_not_an_edit() {
        let mut store = store();
        let id = store.add_section(SectionKind::Hero, None).unwrap();
        let version = store.version();
        let levels = store.history().undo_levels();

        let result = store.apply_all(
            vec![
                Mutation::RenameSection {
                    section_id: id.clone(),
                    name: "Top".to_string(),
                },
                Mutation::RemoveSection {
                    section_id: "missing".to_string(),
                },
            ],
            "Rename and remove",
        );
        assert!(result.is_err());
        assert_eq!(store.version(), version);
        assert_eq!(store.history().undo_levels(), levels);
        assert_ne!(store.page().sections[0].name, "Top");
    }

    #[test]
    fn test_apply_template_uses_theme() {
        let mut store = store();
        store
            .apply_template_by_id("ecommerce-store", TemplateMode::Replace)
            .unwrap();
        assert_eq!(store.page().global_styles.accent_color, "#ef4444");
    }

    #[test]
    fn test_set_animation_rejects_out_of_bounds() {
        let mut store = store();
        let id = store.add_section(SectionKind::Hero, None).unwrap();

        let mut animation = AnimationSettings::new(AnimationKind::FadeIn);
        animation.duration_ms = 60_000;
        assert!(store.set_animation(&id, animation).is_err());
        assert!(!store.page().sections[0].settings.animation.is_enabled());
    }

    #[test]
    fn test_import_replaces_page_and_is_undoable() {
        let mut source = PageBuilderStore::new(Page::new("landing", "Landing"));
        source.add_section(SectionKind::Pricing, None).unwrap();
        let json = source.export_json().unwrap();

        let mut store = store();
        let id = store.add_section(SectionKind::Hero, None).unwrap();
        store.import_json(&json).unwrap();

        assert_eq!(store.page().sections[0].kind(), SectionKind::Pricing);
        assert_eq!(store.selection(), None);

        store.undo().unwrap();
        assert_eq!(store.page().section_ids(), vec![id.as_str()]);
    }

    #[test]
    fn test_memory_store_cannot_save() {
        let mut store = store();
        assert!(matches!(store.save(), Err(EditorError::NotFileBacked)));
    }
}
