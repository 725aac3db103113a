use crate::diagnostic::Diagnostic;
use crate::rules::ValidationRule;
use pagecraft_model::Page;

const RULE: &str = "ab-test-targets";

/// Rule that keeps A/B tests consistent with the sections they target
pub struct AbTestTargetsRule;

impl ValidationRule for AbTestTargetsRule {
    fn name(&self) -> &'static str {
        RULE
    }

    fn description(&self) -> &'static str {
        "A/B tests must target an existing section with two or more matching variants"
    }

    fn check_page(&self, page: &Page) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for test in &page.ab_tests {
            let Some(section) = page.find_section(&test.section_id) else {
                diagnostics.push(Diagnostic::error(
                    RULE,
                    format!("A/B test '{}' targets missing section '{}'", test.name, test.section_id),
                ));
                continue;
            };

            if test.variants.len() < 2 {
                diagnostics.push(
                    Diagnostic::error(RULE, format!("A/B test '{}' needs at least two variants", test.name))
                        .in_section(section.id.clone()),
                );
            }

            for variant in &test.variants {
                if variant.content.kind() != section.kind() {
                    diagnostics.push(
                        Diagnostic::error(
                            RULE,
                            format!(
                                "Variant '{}' is {} content but the section is {}",
                                variant.name,
                                variant.content.kind(),
                                section.kind()
                            ),
                        )
                        .in_section(section.id.clone()),
                    );
                }
            }

            if let Some(winner) = &test.winner {
                if test.variant(winner).is_none() {
                    diagnostics.push(
                        Diagnostic::error(RULE, format!("Winner '{}' is not a variant of '{}'", winner, test.name))
                            .in_section(section.id.clone()),
                    );
                }
            }
        }

        diagnostics
    }
}
