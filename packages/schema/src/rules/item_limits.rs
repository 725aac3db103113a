use crate::diagnostic::Diagnostic;
use crate::rules::ValidationRule;
use pagecraft_model::{Section, SectionContent};

const RULE: &str = "item-limits";

/// Rule that warns when item-based sections grow past what lays out well
pub struct ItemLimitsRule;

fn limit_for(content: &SectionContent) -> Option<(&'static str, usize, usize)> {
    match content {
        SectionContent::Pricing(c) => Some(("content.plans", c.plans.len(), 4)),
        SectionContent::Stats(c) => Some(("content.items", c.items.len(), 8)),
        SectionContent::LogoGrid(c) => Some(("content.logos", c.logos.len(), 24)),
        SectionContent::Gallery(c) => Some(("content.images", c.images.len(), 48)),
        SectionContent::Features(c) => Some(("content.items", c.items.len(), 12)),
        _ => None,
    }
}

impl ValidationRule for ItemLimitsRule {
    fn name(&self) -> &'static str {
        RULE
    }

    fn description(&self) -> &'static str {
        "Warn when a section holds more items than its layout handles"
    }

    fn check_section(&self, section: &Section) -> Vec<Diagnostic> {
        match limit_for(&section.content) {
            Some((field, len, max)) if len > max => vec![Diagnostic::warning(
                RULE,
                format!("{} has {} items; more than {} may not display well", section.kind().label(), len, max),
            )
            .at_field(field)
            .with_suggestion("Split the items across several sections")],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{PricingPlan, SectionKind};

    #[test]
    fn test_too_many_plans_warns() {
        let mut section = Section::new("p", SectionKind::Pricing);
        if let SectionContent::Pricing(pricing) = &mut section.content {
            pricing.plans = vec![PricingPlan::default(); 5];
        }

        let diagnostics = ItemLimitsRule.check_section(&section);
        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics[0].is_error());
    }

    #[test]
    fn test_within_limits() {
        let section = Section::new("p", SectionKind::Pricing);
        assert!(ItemLimitsRule.check_section(&section).is_empty());
    }
}
