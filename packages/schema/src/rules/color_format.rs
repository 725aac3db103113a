use crate::diagnostic::Diagnostic;
use crate::rules::ValidationRule;
use pagecraft_model::{visitor::walk_global_styles, walk_settings, Page, Section, Visitor};
use regex::Regex;
use std::sync::OnceLock;

const RULE: &str = "color-format";

fn color_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)^(#([0-9a-f]{3}|[0-9a-f]{4}|[0-9a-f]{6}|[0-9a-f]{8})|(rgb|rgba|hsl|hsla)\(\s*[0-9.%]+\s*(,\s*[0-9.%]+\s*){2,3}\)|transparent)$",
        )
        .expect("color pattern compiles")
    })
}

pub(crate) fn is_valid_color(value: &str) -> bool {
    color_pattern().is_match(value.trim())
}

/// Rule that rejects colour values browsers would ignore
pub struct ColorFormatRule;

struct ColorCollector {
    diagnostics: Vec<Diagnostic>,
}

impl Visitor for ColorCollector {
    fn visit_color(&mut self, path: &str, value: &str) {
        if is_valid_color(value) {
            return;
        }
        self.diagnostics.push(
            Diagnostic::error(RULE, format!("'{}' is not a valid colour", value))
                .at_field(path)
                .with_suggestion("Use #rrggbb, rgb(), rgba(), hsl() or 'transparent'"),
        );
    }
}

impl ValidationRule for ColorFormatRule {
    fn name(&self) -> &'static str {
        RULE
    }

    fn description(&self) -> &'static str {
        "Require hex, rgb(a) or hsl(a) colour values"
    }

    fn check_section(&self, section: &Section) -> Vec<Diagnostic> {
        let mut collector = ColorCollector {
            diagnostics: Vec::new(),
        };
        walk_settings(&mut collector, &section.settings);
        collector.diagnostics
    }

    fn check_page(&self, page: &Page) -> Vec<Diagnostic> {
        let mut collector = ColorCollector {
            diagnostics: Vec::new(),
        };
        walk_global_styles(&mut collector, &page.global_styles);
        collector.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_forms() {
        for value in ["#fff", "#FFFFFF", "#11223344", "rgb(0, 0, 0)", "rgba(0,0,0,0.5)", "hsl(210, 50%, 40%)", "transparent"] {
            assert!(is_valid_color(value), "{}", value);
        }
        for value in ["red", "#ggg", "#12345", "rgb(0,0)", ""] {
            assert!(!is_valid_color(value), "{}", value);
        }
    }

    #[test]
    fn test_page_global_styles_checked() {
        let mut page = Page::new("p", "Home");
        page.global_styles.primary_color = "blue-ish".to_string();

        let diagnostics = ColorFormatRule.check_page(&page);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].field.as_deref(), Some("global_styles.primary_color"));
    }
}
