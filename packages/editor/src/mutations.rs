//! # Page Mutations
//!
//! High-level semantic operations on a page.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation is one editor command
//! 2. **Validated**: Content-bearing mutations run the schema layer first
//! 3. **Atomic**: A rejected mutation leaves the page untouched
//!
//! ## Mutation Semantics
//!
//! ### Locking
//! - A locked section rejects every mutation except `SetLocked`
//! - Duplicating a locked section is allowed; the copy is unlocked
//!
//! ### Indices
//! - Insert and move indices past the end are clamped to the end
//!
//! ### Content
//! - Replacement content must keep the section's kind

use pagecraft_model::{
    AbTest, AnimationSettings, BreakpointSettings, Device, GlobalStyles, Page, PageMeta, Section,
    SectionContent, SectionKind, SectionSettings,
};
use pagecraft_schema::{
    validate_section, ColorFormatRule, Diagnostic, UniqueAnchorsRule, ValidateOptions,
    ValidationRule,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    /// Insert a section at `index` (end of page when None)
    AddSection {
        section: Section,
        index: Option<usize>,
    },

    RemoveSection {
        section_id: String,
    },

    /// Move a section so it ends up at `index`
    MoveSection {
        section_id: String,
        index: usize,
    },

    /// Insert a copy right after the original
    DuplicateSection {
        section_id: String,
        new_id: String,
    },

    UpdateContent {
        section_id: String,
        content: SectionContent,
    },

    UpdateSettings {
        section_id: String,
        settings: SectionSettings,
    },

    SetResponsive {
        section_id: String,
        device: Device,
        settings: BreakpointSettings,
    },

    SetAnimation {
        section_id: String,
        animation: AnimationSettings,
    },

    SetVisibility {
        section_id: String,
        visible: bool,
    },

    SetLocked {
        section_id: String,
        locked: bool,
    },

    RenameSection {
        section_id: String,
        name: String,
    },

    /// Swap the whole section list (templates, bulk reorder)
    ReplaceSections {
        sections: Vec<Section>,
    },

    UpdateMeta {
        meta: PageMeta,
    },

    UpdateGlobalStyles {
        styles: GlobalStyles,
    },

    AddAbTest {
        test: AbTest,
    },

    RemoveAbTest {
        test_id: String,
    },

    /// Replace an A/B test (status, counters, winner) by id
    UpdateAbTest {
        test: AbTest,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Section id already in use: {0}")]
    DuplicateId(String),

    #[error("Section is locked: {0}")]
    SectionLocked(String),

    #[error("Content kind mismatch: section is {expected}, content is {found}")]
    KindMismatch {
        expected: SectionKind,
        found: SectionKind,
    },

    #[error("A/B test not found: {0}")]
    AbTestNotFound(String),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<Diagnostic>),
}

impl Mutation {
    /// Apply mutation to the page with validation
    pub fn apply(&self, page: &mut Page) -> Result<(), MutationError> {
        self.validate(page)?;

        match self {
            Mutation::AddSection { section, index } => {
                let at = index.unwrap_or(page.sections.len()).min(page.sections.len());
                page.sections.insert(at, section.clone());
            }

            Mutation::RemoveSection { section_id } => {
                let pos = Self::position(page, section_id)?;
                page.sections.remove(pos);
            }

            Mutation::MoveSection { section_id, index } => {
                let pos = Self::position(page, section_id)?;
                let section = page.sections.remove(pos);
                let at = (*index).min(page.sections.len());
                page.sections.insert(at, section);
            }

            Mutation::DuplicateSection { section_id, new_id } => {
                let pos = Self::position(page, section_id)?;
                let copy = page.sections[pos].duplicate(new_id.clone());
                page.sections.insert(pos + 1, copy);
            }

            Mutation::UpdateContent { section_id, content } => {
                Self::section_mut(page, section_id)?.content = content.clone();
            }

            Mutation::UpdateSettings { section_id, settings } => {
                Self::section_mut(page, section_id)?.settings = settings.clone();
            }

            Mutation::SetResponsive { section_id, device, settings } => {
                *Self::section_mut(page, section_id)?
                    .settings
                    .responsive
                    .for_device_mut(*device) = settings.clone();
            }

            Mutation::SetAnimation { section_id, animation } => {
                Self::section_mut(page, section_id)?.settings.animation = *animation;
            }

            Mutation::SetVisibility { section_id, visible } => {
                Self::section_mut(page, section_id)?.visible = *visible;
            }

            Mutation::SetLocked { section_id, locked } => {
                Self::section_mut(page, section_id)?.locked = *locked;
            }

            Mutation::RenameSection { section_id, name } => {
                Self::section_mut(page, section_id)?.name = name.trim().to_string();
            }

            Mutation::ReplaceSections { sections } => {
                page.sections = sections.clone();
            }

            Mutation::UpdateMeta { meta } => {
                page.meta = meta.clone();
            }

            Mutation::UpdateGlobalStyles { styles } => {
                page.global_styles = styles.clone();
            }

            Mutation::AddAbTest { test } => {
                page.ab_tests.push(test.clone());
            }

            Mutation::RemoveAbTest { test_id } => {
                page.ab_tests.retain(|t| &t.id != test_id);
            }

            Mutation::UpdateAbTest { test } => {
                if let Some(existing) = page.ab_tests.iter_mut().find(|t| t.id == test.id) {
                    *existing = test.clone();
                }
            }
        }

        page.touch();
        Ok(())
    }

    /// Validate without applying
    pub fn validate(&self, page: &Page) -> Result<(), MutationError> {
        match self {
            Mutation::AddSection { section, .. } => {
                if section.id.trim().is_empty() {
                    return Err(MutationError::InvalidStructure(
                        "Section id must not be empty".to_string(),
                    ));
                }
                if page.contains_section(&section.id) {
                    return Err(MutationError::DuplicateId(section.id.clone()));
                }
                check_schema(section)?;
                check_anchor(page, section)
            }

            Mutation::RemoveSection { section_id } | Mutation::MoveSection { section_id, .. } => {
                Self::editable(page, section_id).map(|_| ())
            }

            Mutation::DuplicateSection { section_id, new_id } => {
                Self::existing(page, section_id)?;
                if new_id.trim().is_empty() {
                    return Err(MutationError::InvalidStructure(
                        "Section id must not be empty".to_string(),
                    ));
                }
                if page.contains_section(new_id) {
                    return Err(MutationError::DuplicateId(new_id.clone()));
                }
                Ok(())
            }

            Mutation::UpdateContent { section_id, content } => {
                let section = Self::editable(page, section_id)?;
                if content.kind() != section.kind() {
                    return Err(MutationError::KindMismatch {
                        expected: section.kind(),
                        found: content.kind(),
                    });
                }
                let mut candidate = section.clone();
                candidate.content = content.clone();
                check_schema(&candidate)
            }

            Mutation::UpdateSettings { section_id, settings } => {
                let mut candidate = Self::editable(page, section_id)?.clone();
                candidate.settings = settings.clone();
                check_schema(&candidate)?;
                check_anchor(page, &candidate)
            }

            Mutation::SetResponsive { section_id, device, settings } => {
                let mut candidate = Self::editable(page, section_id)?.clone();
                *candidate.settings.responsive.for_device_mut(*device) = settings.clone();
                check_schema(&candidate)
            }

            Mutation::SetAnimation { section_id, animation } => {
                let mut candidate = Self::editable(page, section_id)?.clone();
                candidate.settings.animation = *animation;
                check_schema(&candidate)
            }

            Mutation::SetVisibility { section_id, .. } => {
                Self::editable(page, section_id).map(|_| ())
            }

            Mutation::SetLocked { section_id, .. } => Self::existing(page, section_id).map(|_| ()),

            Mutation::RenameSection { section_id, name } => {
                Self::editable(page, section_id)?;
                if name.trim().is_empty() {
                    return Err(MutationError::InvalidStructure(
                        "Section name must not be empty".to_string(),
                    ));
                }
                Ok(())
            }

            Mutation::ReplaceSections { sections } => {
                let mut seen = HashSet::new();
                for section in sections {
                    if !seen.insert(section.id.as_str()) {
                        return Err(MutationError::DuplicateId(section.id.clone()));
                    }
                    check_schema(section)?;
                }
                let mut candidate = Page::new(page.id.clone(), page.title.clone());
                candidate.sections = sections.clone();
                let errors = UniqueAnchorsRule.check_page(&candidate);
                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(MutationError::Validation(errors))
                }
            }

            Mutation::UpdateMeta { .. } => Ok(()),

            Mutation::UpdateGlobalStyles { styles } => {
                let mut candidate = Page::new(page.id.clone(), page.title.clone());
                candidate.global_styles = styles.clone();
                let errors: Vec<Diagnostic> = ColorFormatRule
                    .check_page(&candidate)
                    .into_iter()
                    .filter(|d| d.is_error())
                    .collect();
                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(MutationError::Validation(errors))
                }
            }

            Mutation::AddAbTest { test } => {
                if page.find_ab_test(&test.id).is_some() {
                    return Err(MutationError::InvalidStructure(format!(
                        "A/B test id already in use: {}",
                        test.id
                    )));
                }
                Self::check_ab_test(page, test)
            }

            Mutation::RemoveAbTest { test_id } => page
                .find_ab_test(test_id)
                .map(|_| ())
                .ok_or_else(|| MutationError::AbTestNotFound(test_id.clone())),

            Mutation::UpdateAbTest { test } => {
                let existing = page
                    .find_ab_test(&test.id)
                    .ok_or_else(|| MutationError::AbTestNotFound(test.id.clone()))?;
                if existing.section_id != test.section_id {
                    return Err(MutationError::InvalidStructure(
                        "An A/B test cannot change its target section".to_string(),
                    ));
                }
                Self::check_ab_test(page, test)
            }
        }
    }

    /// Section this mutation targets, if any
    pub fn target_section(&self) -> Option<&str> {
        match self {
            Mutation::AddSection { section, .. } => Some(section.id.as_str()),
            Mutation::RemoveSection { section_id }
            | Mutation::MoveSection { section_id, .. }
            | Mutation::DuplicateSection { section_id, .. }
            | Mutation::UpdateContent { section_id, .. }
            | Mutation::UpdateSettings { section_id, .. }
            | Mutation::SetResponsive { section_id, .. }
            | Mutation::SetAnimation { section_id, .. }
            | Mutation::SetVisibility { section_id, .. }
            | Mutation::SetLocked { section_id, .. }
            | Mutation::RenameSection { section_id, .. } => Some(section_id.as_str()),
            Mutation::AddAbTest { test } | Mutation::UpdateAbTest { test } => {
                Some(test.section_id.as_str())
            }
            Mutation::ReplaceSections { .. }
            | Mutation::UpdateMeta { .. }
            | Mutation::UpdateGlobalStyles { .. }
            | Mutation::RemoveAbTest { .. } => None,
        }
    }

    /// Short name for logs and history descriptions
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddSection { .. } => "Add section",
            Mutation::RemoveSection { .. } => "Remove section",
            Mutation::MoveSection { .. } => "Move section",
            Mutation::DuplicateSection { .. } => "Duplicate section",
            Mutation::UpdateContent { .. } => "Edit content",
            Mutation::UpdateSettings { .. } => "Edit settings",
            Mutation::SetResponsive { .. } => "Edit responsive settings",
            Mutation::SetAnimation { .. } => "Edit animation",
            Mutation::SetVisibility { .. } => "Toggle visibility",
            Mutation::SetLocked { .. } => "Toggle lock",
            Mutation::RenameSection { .. } => "Rename section",
            Mutation::ReplaceSections { .. } => "Replace sections",
            Mutation::UpdateMeta { .. } => "Edit page meta",
            Mutation::UpdateGlobalStyles { .. } => "Edit global styles",
            Mutation::AddAbTest { .. } => "Create A/B test",
            Mutation::RemoveAbTest { .. } => "Remove A/B test",
            Mutation::UpdateAbTest { .. } => "Update A/B test",
        }
    }

    fn position(page: &Page, section_id: &str) -> Result<usize, MutationError> {
        page.position_of(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))
    }

    fn section_mut<'a>(page: &'a mut Page, section_id: &str) -> Result<&'a mut Section, MutationError> {
        page.find_section_mut(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))
    }

    fn existing<'a>(page: &'a Page, section_id: &str) -> Result<&'a Section, MutationError> {
        page.find_section(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))
    }

    fn editable<'a>(page: &'a Page, section_id: &str) -> Result<&'a Section, MutationError> {
        let section = Self::existing(page, section_id)?;
        if section.locked {
            return Err(MutationError::SectionLocked(section_id.to_string()));
        }
        Ok(section)
    }

    fn check_ab_test(page: &Page, test: &AbTest) -> Result<(), MutationError> {
        let section = Self::existing(page, &test.section_id)?;
        if test.variants.len() < 2 {
            return Err(MutationError::InvalidStructure(
                "An A/B test needs at least two variants".to_string(),
            ));
        }
        let mut ids = HashSet::new();
        for variant in &test.variants {
            if !ids.insert(variant.id.as_str()) {
                return Err(MutationError::InvalidStructure(format!(
                    "Duplicate variant id: {}",
                    variant.id
                )));
            }
            if variant.content.kind() != section.kind() {
                return Err(MutationError::KindMismatch {
                    expected: section.kind(),
                    found: variant.content.kind(),
                });
            }
        }
        if let Some(winner) = &test.winner {
            if test.variant(winner).is_none() {
                return Err(MutationError::InvalidStructure(format!(
                    "Winner is not a variant: {}",
                    winner
                )));
            }
        }
        Ok(())
    }
}

/// Reject a section when the schema layer reports any error
fn check_schema(section: &Section) -> Result<(), MutationError> {
    let report = validate_section(section, &ValidateOptions::errors_only());
    if report.has_errors() {
        Err(MutationError::Validation(report.into_errors()))
    } else {
        Ok(())
    }
}

/// Reject an anchor already used by another section of `page`
fn check_anchor(page: &Page, section: &Section) -> Result<(), MutationError> {
    let anchor = match section.settings.anchor_id.as_deref() {
        Some(anchor) => anchor,
        None => return Ok(()),
    };
    let taken = page
        .sections
        .iter()
        .any(|s| s.id != section.id && s.settings.anchor_id.as_deref() == Some(anchor));
    if !taken {
        return Ok(());
    }
    Err(MutationError::Validation(vec![Diagnostic::error(
        UniqueAnchorsRule.name(),
        format!("Anchor '#{}' is used more than once", anchor),
    )
    .in_section(section.id.clone())
    .at_field("settings.anchor_id")]))
}

/// Result of applying a mutation
#[derive(Debug, Clone)]
pub struct MutationResult {
    /// New version number
    pub version: u64,

    /// Secondary mutations applied by post-effects
    pub effects: Vec<Mutation>,
}
