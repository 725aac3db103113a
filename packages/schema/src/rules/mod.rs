mod ab_test_targets;
mod animation_bounds;
mod color_format;
mod hidden_everywhere;
mod item_limits;
mod required_fields;
mod unique_ids;
mod url_format;

pub use ab_test_targets::AbTestTargetsRule;
pub use animation_bounds::AnimationBoundsRule;
pub use color_format::ColorFormatRule;
pub use hidden_everywhere::HiddenEverywhereRule;
pub use item_limits::ItemLimitsRule;
pub use required_fields::RequiredFieldsRule;
pub use unique_ids::{UniqueAnchorsRule, UniqueSectionIdsRule};
pub use url_format::UrlFormatRule;

use crate::diagnostic::Diagnostic;
use pagecraft_model::{Page, Section};

/// Trait for implementing validation rules
pub trait ValidationRule: Send + Sync {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check one section's content and settings
    fn check_section(&self, _section: &Section) -> Vec<Diagnostic> {
        Vec::new()
    }

    /// Check constraints spanning the whole page
    fn check_page(&self, _page: &Page) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Registry of validation rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(RequiredFieldsRule),
                Box::new(UrlFormatRule),
                Box::new(ColorFormatRule),
                Box::new(AnimationBoundsRule),
                Box::new(ItemLimitsRule),
                Box::new(HiddenEverywhereRule),
                Box::new(UniqueSectionIdsRule),
                Box::new(UniqueAnchorsRule),
                Box::new(AbTestTargetsRule),
            ],
        }
    }

    pub fn rules(&self) -> &[Box<dyn ValidationRule>] {
        &self.rules
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
