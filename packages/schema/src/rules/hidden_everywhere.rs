use crate::diagnostic::Diagnostic;
use crate::rules::ValidationRule;
use pagecraft_model::Section;

/// Rule that flags sections switched on but hidden at every breakpoint
pub struct HiddenEverywhereRule;

impl ValidationRule for HiddenEverywhereRule {
    fn name(&self) -> &'static str {
        "hidden-everywhere"
    }

    fn description(&self) -> &'static str {
        "Warn about visible sections hidden on every device"
    }

    fn check_section(&self, section: &Section) -> Vec<Diagnostic> {
        if section.visible && section.settings.responsive.is_hidden_everywhere() {
            vec![Diagnostic::warning(
                self.name(),
                format!("'{}' is hidden on desktop, tablet and mobile", section.name),
            )
            .at_field("settings.responsive")
            .with_suggestion("Show it on at least one device or turn the section off")]
        } else {
            Vec::new()
        }
    }
}
