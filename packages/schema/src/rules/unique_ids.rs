use crate::diagnostic::Diagnostic;
use crate::rules::ValidationRule;
use pagecraft_model::Page;
use std::collections::HashSet;

/// Rule that rejects pages with two sections sharing an id
pub struct UniqueSectionIdsRule;

impl ValidationRule for UniqueSectionIdsRule {
    fn name(&self) -> &'static str {
        "unique-section-ids"
    }

    fn description(&self) -> &'static str {
        "Section ids must be unique within a page"
    }

    fn check_page(&self, page: &Page) -> Vec<Diagnostic> {
        let mut seen = HashSet::new();
        page.sections
            .iter()
            .filter(|s| !seen.insert(s.id.as_str()))
            .map(|s| {
                Diagnostic::error(self.name(), format!("Duplicate section id '{}'", s.id))
                    .in_section(s.id.clone())
            })
            .collect()
    }
}

/// Rule that rejects duplicate in-page anchors
pub struct UniqueAnchorsRule;

impl ValidationRule for UniqueAnchorsRule {
    fn name(&self) -> &'static str {
        "unique-anchors"
    }

    fn description(&self) -> &'static str {
        "Anchor ids must be unique within a page"
    }

    fn check_page(&self, page: &Page) -> Vec<Diagnostic> {
        let mut seen = HashSet::new();
        let mut diagnostics = Vec::new();

        for section in &page.sections {
            if let Some(anchor) = section.settings.anchor_id.as_deref() {
                if !seen.insert(anchor) {
                    diagnostics.push(
                        Diagnostic::error(self.name(), format!("Anchor '#{}' is used more than once", anchor))
                            .in_section(section.id.clone())
                            .at_field("settings.anchor_id"),
                    );
                }
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{Section, SectionKind};

    #[test]
    fn test_duplicate_ids_reported_once_per_extra() {
        let mut page = Page::new("p", "Home");
        page.sections.push(Section::new("a", SectionKind::Hero));
        page.sections.push(Section::new("a", SectionKind::Faq));
        page.sections.push(Section::new("b", SectionKind::Faq));

        let diagnostics = UniqueSectionIdsRule.check_page(&page);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].section_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_duplicate_anchor() {
        let mut page = Page::new("p", "Home");
        for id in ["a", "b"] {
            let mut section = Section::new(id, SectionKind::Hero);
            section.settings.anchor_id = Some("top".to_string());
            page.sections.push(section);
        }

        let diagnostics = UniqueAnchorsRule.check_page(&page);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].section_id.as_deref(), Some("b"));
    }
}
