//! # Post-Effect System
//!
//! Mutations trigger cascading effects to keep the page consistent.
//!
//! ## Design
//!
//! Effects are analyzed against the page *after* the primary mutation has
//! been applied. For example:
//! - Removing a section → remove the A/B tests that target it
//! - Replacing the section list → remove A/B tests left without a section
//! - Duplicating a section → clear the anchor on the copy so anchors stay unique
//!
//! Post-effects are:
//! - **Deterministic**: Same mutation always produces same effects
//! - **Minimal**: Only generate necessary secondary mutations

use crate::mutations::{Mutation, MutationError};
use pagecraft_model::Page;
use tracing::debug;

/// Post-effect that can be triggered by a mutation
pub trait PostEffect: std::fmt::Debug + Send + Sync {
    /// Analyze the mutation and generate secondary mutations if needed
    fn analyze(&self, mutation: &Mutation, page: &Page) -> Vec<Mutation>;
}

/// Drop A/B tests whose target section no longer exists
#[derive(Debug)]
pub struct CleanupOrphanedAbTests;

impl PostEffect for CleanupOrphanedAbTests {
    fn analyze(&self, mutation: &Mutation, page: &Page) -> Vec<Mutation> {
        match mutation {
            Mutation::RemoveSection { .. } | Mutation::ReplaceSections { .. } => page
                .ab_tests
                .iter()
                .filter(|test| !page.contains_section(&test.section_id))
                .map(|test| Mutation::RemoveAbTest {
                    test_id: test.id.clone(),
                })
                .collect(),
            _ => vec![],
        }
    }
}

/// Clear the anchor copied onto a duplicated section
#[derive(Debug)]
pub struct ClearDuplicatedAnchor;

impl PostEffect for ClearDuplicatedAnchor {
    fn analyze(&self, mutation: &Mutation, page: &Page) -> Vec<Mutation> {
        let Mutation::DuplicateSection { new_id, .. } = mutation else {
            return vec![];
        };

        match page.find_section(new_id) {
            Some(copy) if copy.settings.anchor_id.is_some() => {
                let mut settings = copy.settings.clone();
                settings.anchor_id = None;
                vec![Mutation::UpdateSettings {
                    section_id: new_id.clone(),
                    settings,
                }]
            }
            _ => vec![],
        }
    }
}

/// Post-effect engine that applies all registered effects
#[derive(Debug)]
pub struct PostEffectEngine {
    effects: Vec<Box<dyn PostEffect>>,
}

impl PostEffectEngine {
    /// Create engine with default effects
    pub fn new() -> Self {
        Self {
            effects: vec![Box::new(CleanupOrphanedAbTests), Box::new(ClearDuplicatedAnchor)],
        }
    }

    /// Engine without any effects
    pub fn empty() -> Self {
        Self { effects: vec![] }
    }

    pub fn add_effect(&mut self, effect: Box<dyn PostEffect>) {
        self.effects.push(effect);
    }

    /// Analyze a mutation and generate all secondary mutations
    pub fn analyze(&self, mutation: &Mutation, page: &Page) -> Vec<Mutation> {
        let mut secondary_mutations = Vec::new();

        for effect in &self.effects {
            let mut effect_mutations = effect.analyze(mutation, page);
            secondary_mutations.append(&mut effect_mutations);
        }

        secondary_mutations
    }

    /// Apply a mutation with all its post-effects.
    /// Returns the secondary mutations that were applied.
    ///
    /// On error the page may be partially modified; callers that need
    /// atomicity keep a backup (see [`crate::Document::apply`]).
    pub fn apply_with_effects(
        &self,
        mutation: &Mutation,
        page: &mut Page,
    ) -> Result<Vec<Mutation>, MutationError> {
        mutation.apply(page)?;

        let secondary = self.analyze(mutation, page);
        for secondary_mutation in &secondary {
            debug!(
                primary = mutation.name(),
                effect = secondary_mutation.name(),
                "applying post-effect"
            );
            secondary_mutation.apply(page)?;
        }

        Ok(secondary)
    }
}

impl Default for PostEffectEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{AbTest, AbVariant, Section, SectionContent, SectionKind};

    fn page_with_test() -> Page {
        let mut page = Page::new("p", "Home");
        page.sections.push(Section::new("hero", SectionKind::Hero));
        page.sections.push(Section::new("cta", SectionKind::Cta));
        let content = SectionContent::default_for(SectionKind::Hero);
        page.ab_tests.push(AbTest::new(
            "t1",
            "hero",
            "Headline",
            vec![
                AbVariant::new("a", "A", content.clone()),
                AbVariant::new("b", "B", content),
            ],
        ));
        page
    }

    #[test]
    fn test_post_effect_engine_creation() {
        let engine = PostEffectEngine::new();
        assert_eq!(engine.effects.len(), 2);
        assert_eq!(PostEffectEngine::empty().effects.len(), 0);
    }

    #[test]
    fn test_analyze_returns_empty_for_simple_mutations() {
        let page = page_with_test();
        let engine = PostEffectEngine::new();

        let mutation = Mutation::RenameSection {
            section_id: "hero".to_string(),
            name: "Top".to_string(),
        };

        assert!(engine.analyze(&mutation, &page).is_empty());
    }

    #[test]
    fn test_remove_section_drops_ab_tests() {
        let mut page = page_with_test();
        let engine = PostEffectEngine::new();

        let applied = engine
            .apply_with_effects(
                &Mutation::RemoveSection {
                    section_id: "hero".to_string(),
                },
                &mut page,
            )
            .unwrap();

        assert_eq!(
            applied,
            vec![Mutation::RemoveAbTest {
                test_id: "t1".to_string()
            }]
        );
        assert!(page.ab_tests.is_empty());
    }

    #[test]
    fn test_remove_other_section_keeps_ab_tests() {
        let mut page = page_with_test();
        let engine = PostEffectEngine::new();

        let applied = engine
            .apply_with_effects(
                &Mutation::RemoveSection {
                    section_id: "cta".to_string(),
                },
                &mut page,
            )
            .unwrap();

        assert!(applied.is_empty());
        assert_eq!(page.ab_tests.len(), 1);
    }

    #[test]
    fn test_duplicate_clears_anchor_on_copy() {
        let mut page = page_with_test();
        page.sections[1].settings.anchor_id = Some("signup".to_string());
        let engine = PostEffectEngine::new();

        let applied = engine
            .apply_with_effects(
                &Mutation::DuplicateSection {
                    section_id: "cta".to_string(),
                    new_id: "cta-2".to_string(),
                },
                &mut page,
            )
            .unwrap();

        assert_eq!(applied.len(), 1);
        assert_eq!(
            page.find_section("cta").unwrap().settings.anchor_id.as_deref(),
            Some("signup")
        );
        assert_eq!(page.find_section("cta-2").unwrap().settings.anchor_id, None);
    }
}
