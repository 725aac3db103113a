//! # A/B Testing
//!
//! Section-level experiments driven through the store. Lifecycle:
//!
//! ```text
//! create (Draft) → start (Running) → record impressions/conversions → conclude (Concluded)
//! ```
//!
//! Creating, starting and concluding are undoable edits. Impression and
//! conversion counters bypass history.

use crate::store::PageBuilderStore;
use crate::{EditorError, Mutation, MutationError};
use pagecraft_model::{AbTest, AbTestStatus, AbVariant, SectionContent};
use tracing::info;

pub const CONTROL_VARIANT_ID: &str = "control";

pub struct AbTestManager<'a> {
    store: &'a mut PageBuilderStore,
}

impl<'a> AbTestManager<'a> {
    pub fn new(store: &'a mut PageBuilderStore) -> Self {
        Self { store }
    }

    /// Create a draft test on `section_id`. The section's current content
    /// becomes the control variant. Returns the test id.
    pub fn create(
        &mut self,
        section_id: &str,
        name: &str,
        variant_contents: Vec<SectionContent>,
    ) -> Result<String, EditorError> {
        let section = self
            .store
            .page()
            .find_section(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))?;

        let mut variants = vec![AbVariant::new(
            CONTROL_VARIANT_ID,
            "Control",
            section.content.clone(),
        )];
        for (i, content) in variant_contents.into_iter().enumerate() {
            variants.push(AbVariant::new(
                format!("variant-{}", i + 1),
                format!("Variant {}", variant_letter(i + 1)),
                content,
            ));
        }

        let test_id = self.new_test_id();
        let test = AbTest::new(test_id.clone(), section_id, name, variants);
        self.store
            .apply_described(Mutation::AddAbTest { test }, "Create A/B test")?;

        info!(test = %test_id, section = section_id, "created A/B test");
        Ok(test_id)
    }

    pub fn start(&mut self, test_id: &str) -> Result<(), EditorError> {
        let mut test = self.test(test_id)?.clone();
        if test.status != AbTestStatus::Draft {
            return Err(EditorError::AbTest(format!(
                "Only draft tests can be started: {}",
                test_id
            )));
        }
        test.status = AbTestStatus::Running;
        self.store
            .apply_described(Mutation::UpdateAbTest { test }, "Start A/B test")?;
        Ok(())
    }

    pub fn record_impression(&mut self, test_id: &str, variant_id: &str) -> Result<(), EditorError> {
        self.bump(test_id, variant_id, |variant| variant.impressions += 1)
    }

    pub fn record_conversion(&mut self, test_id: &str, variant_id: &str) -> Result<(), EditorError> {
        self.bump(test_id, variant_id, |variant| variant.conversions += 1)
    }

    /// Variant a visitor sees. None unless the test is running.
    pub fn assign(&self, test_id: &str, visitor_id: &str) -> Result<Option<&AbVariant>, EditorError> {
        Ok(self.test(test_id)?.assign(visitor_id))
    }

    /// Stop the test and pick the leading variant. With `apply_winner` the
    /// winning content replaces the section content in the same undo step.
    /// Returns the winning variant id.
    pub fn conclude(&mut self, test_id: &str, apply_winner: bool) -> Result<String, EditorError> {
        let mut test = self.test(test_id)?.clone();
        if test.status != AbTestStatus::Running {
            return Err(EditorError::AbTest(format!(
                "Only running tests can be concluded: {}",
                test_id
            )));
        }

        let winner = test
            .leader()
            .cloned()
            .ok_or_else(|| EditorError::AbTest(format!("Test has no variants: {}", test_id)))?;

        if apply_winner {
            let section = self
                .store
                .page()
                .find_section(&test.section_id)
                .ok_or_else(|| MutationError::SectionNotFound(test.section_id.clone()))?;
            if section.locked {
                return Err(MutationError::SectionLocked(section.id.clone()).into());
            }
        }

        test.status = AbTestStatus::Concluded;
        test.winner = Some(winner.id.clone());
        let section_id = test.section_id.clone();

        let mut mutations = vec![Mutation::UpdateAbTest { test }];
        if apply_winner {
            mutations.push(Mutation::UpdateContent {
                section_id,
                content: winner.content,
            });
        }
        self.store.apply_all(mutations, "Conclude A/B test")?;

        info!(test = test_id, winner = %winner.id, applied = apply_winner, "concluded A/B test");
        Ok(winner.id)
    }

    fn test(&self, test_id: &str) -> Result<&AbTest, EditorError> {
        self.store
            .page()
            .find_ab_test(test_id)
            .ok_or_else(|| MutationError::AbTestNotFound(test_id.to_string()).into())
    }

    fn bump(
        &mut self,
        test_id: &str,
        variant_id: &str,
        f: impl FnOnce(&mut AbVariant),
    ) -> Result<(), EditorError> {
        let mut test = self.test(test_id)?.clone();
        if test.status != AbTestStatus::Running {
            return Err(EditorError::AbTest(format!("Test is not running: {}", test_id)));
        }
        let variant = test
            .variant_mut(variant_id)
            .ok_or_else(|| EditorError::AbTest(format!("Unknown variant: {}", variant_id)))?;
        f(variant);

        self.store.apply_untracked(Mutation::UpdateAbTest { test })?;
        Ok(())
    }

    fn new_test_id(&mut self) -> String {
        loop {
            let id = format!("ab-{}", self.store.next_id());
            if self.store.page().find_ab_test(&id).is_none() {
                return id;
            }
        }
    }
}

fn variant_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}
