use crate::diagnostic::Diagnostic;
use crate::rules::ValidationRule;
use pagecraft_model::{ProductSource, Section, SectionContent};

const RULE: &str = "required-fields";

/// Rule that checks each section kind carries the content it cannot render without
pub struct RequiredFieldsRule;

impl ValidationRule for RequiredFieldsRule {
    fn name(&self) -> &'static str {
        RULE
    }

    fn description(&self) -> &'static str {
        "Require the content fields each section kind needs to render"
    }

    fn check_section(&self, section: &Section) -> Vec<Diagnostic> {
        let mut checker = Checker::default();
        checker.check(&section.content);
        checker.diagnostics
    }
}

#[derive(Default)]
struct Checker {
    diagnostics: Vec<Diagnostic>,
}

impl Checker {
    fn require_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.diagnostics.push(
                Diagnostic::error(RULE, format!("'{}' must not be empty", field)).at_field(field),
            );
        }
    }

    fn require_items(&mut self, field: &str, len: usize) {
        if len == 0 {
            self.diagnostics.push(
                Diagnostic::error(RULE, format!("'{}' needs at least one item", field))
                    .at_field(field)
                    .with_suggestion("Add an item or remove the section"),
            );
        }
    }

    fn check(&mut self, content: &SectionContent) {
        match content {
            SectionContent::Hero(c) => self.require_text("content.headline", &c.headline),
            SectionContent::Features(c) => {
                self.require_items("content.items", c.items.len());
                for (i, item) in c.items.iter().enumerate() {
                    self.require_text(&format!("content.items[{}].title", i), &item.title);
                }
            }
            SectionContent::Pricing(c) => {
                self.require_items("content.plans", c.plans.len());
                for (i, plan) in c.plans.iter().enumerate() {
                    self.require_text(&format!("content.plans[{}].name", i), &plan.name);
                    self.require_text(&format!("content.plans[{}].price", i), &plan.price);
                }
            }
            SectionContent::Testimonials(c) => {
                self.require_items("content.items", c.items.len());
                for (i, item) in c.items.iter().enumerate() {
                    self.require_text(&format!("content.items[{}].quote", i), &item.quote);
                    self.require_text(&format!("content.items[{}].author", i), &item.author);
                    if let Some(rating) = item.rating {
                        if !(1..=5).contains(&rating) {
                            let field = format!("content.items[{}].rating", i);
                            self.diagnostics.push(
                                Diagnostic::error(RULE, "Rating must be between 1 and 5")
                                    .at_field(field),
                            );
                        }
                    }
                }
            }
            SectionContent::Faq(c) => {
                self.require_items("content.items", c.items.len());
                for (i, item) in c.items.iter().enumerate() {
                    self.require_text(&format!("content.items[{}].question", i), &item.question);
                    self.require_text(&format!("content.items[{}].answer", i), &item.answer);
                }
            }
            SectionContent::Team(c) => {
                self.require_items("content.members", c.members.len());
                for (i, member) in c.members.iter().enumerate() {
                    self.require_text(&format!("content.members[{}].name", i), &member.name);
                }
            }
            SectionContent::Stats(c) => {
                self.require_items("content.items", c.items.len());
                for (i, item) in c.items.iter().enumerate() {
                    self.require_text(&format!("content.items[{}].value", i), &item.value);
                    self.require_text(&format!("content.items[{}].label", i), &item.label);
                }
            }
            SectionContent::Timeline(c) => {
                self.require_items("content.events", c.events.len());
                for (i, event) in c.events.iter().enumerate() {
                    self.require_text(&format!("content.events[{}].title", i), &event.title);
                }
            }
            SectionContent::Video(c) => self.require_text("content.url", &c.url),
            SectionContent::LogoGrid(c) => {
                for (i, logo) in c.logos.iter().enumerate() {
                    self.require_text(&format!("content.logos[{}].image.url", i), &logo.image.url);
                }
            }
            SectionContent::Cta(c) => {
                self.require_text("content.headline", &c.headline);
                self.require_text("content.button.label", &c.button.label);
            }
            SectionContent::Contact(c) => {
                let has_email = c.email.as_deref().is_some_and(|e| !e.trim().is_empty());
                if !has_email && !c.show_form {
                    self.diagnostics.push(
                        Diagnostic::error(RULE, "Contact section needs an email address or a form")
                            .at_field("content.email")
                            .with_suggestion("Set 'email' or enable 'show_form'"),
                    );
                }
                if c.show_form {
                    self.require_items("content.fields", c.fields.len());
                    for (i, field) in c.fields.iter().enumerate() {
                        self.require_text(&format!("content.fields[{}].name", i), &field.name);
                    }
                }
            }
            SectionContent::Newsletter(c) => {
                self.require_text("content.button_label", &c.button_label)
            }
            SectionContent::Gallery(c) => {
                for (i, image) in c.images.iter().enumerate() {
                    self.require_text(&format!("content.images[{}].url", i), &image.url);
                }
            }
            SectionContent::RichText(c) => self.require_text("content.body", &c.body),
            SectionContent::ProductGrid(c) => match c.source {
                ProductSource::Featured => {}
                ProductSource::Collection => {
                    self.require_text("content.collection", c.collection.as_deref().unwrap_or(""))
                }
                ProductSource::Manual => {
                    self.require_items("content.product_ids", c.product_ids.len())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{ContactContent, FaqItem, SectionKind};

    fn faq_section(items: Vec<FaqItem>) -> Section {
        let mut section = Section::new("faq", SectionKind::Faq);
        if let SectionContent::Faq(faq) = &mut section.content {
            faq.items = items;
        }
        section
    }

    #[test]
    fn test_faq_requires_items() {
        let diagnostics = RequiredFieldsRule.check_section(&faq_section(vec![]));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].field.as_deref(), Some("content.items"));
    }

    #[test]
    fn test_faq_requires_answer() {
        let diagnostics = RequiredFieldsRule.check_section(&faq_section(vec![FaqItem {
            question: "Why?".to_string(),
            answer: "  ".to_string(),
        }]));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].field.as_deref(), Some("content.items[0].answer"));
    }

    #[test]
    fn test_contact_needs_email_or_form() {
        let section = Section::with_content(
            "c",
            SectionContent::Contact(ContactContent {
                title: "Contact".to_string(),
                show_form: false,
                ..ContactContent::default()
            }),
        );
        let diagnostics = RequiredFieldsRule.check_section(&section);
        assert_eq!(diagnostics.len(), 1);

        let section = Section::with_content(
            "c",
            SectionContent::Contact(ContactContent {
                email: Some("hello@example.com".to_string()),
                ..ContactContent::default()
            }),
        );
        assert!(RequiredFieldsRule.check_section(&section).is_empty());
    }

    #[test]
    fn test_manual_product_grid_needs_ids() {
        let mut section = Section::new("p", SectionKind::ProductGrid);
        if let SectionContent::ProductGrid(grid) = &mut section.content {
            grid.source = ProductSource::Manual;
        }
        let diagnostics = RequiredFieldsRule.check_section(&section);
        assert_eq!(diagnostics[0].field.as_deref(), Some("content.product_ids"));
    }
}
