use crate::diagnostic::Diagnostic;
use crate::rules::ValidationRule;
use pagecraft_model::{walk_section, Page, Section, Visitor};
use regex::Regex;
use std::sync::OnceLock;

const RULE: &str = "url-format";

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(https?://[^\s/$.?#][^\s]*|/[^\s]*|#[^\s]*|mailto:[^\s@]+@[^\s@]+|tel:\+?[0-9 ()\-]+)$")
            .expect("url pattern compiles")
    })
}

/// True for absolute http(s), root-relative, anchor, mailto and tel links
pub(crate) fn is_valid_url(url: &str) -> bool {
    url_pattern().is_match(url)
}

/// Rule that rejects malformed links and media URLs
pub struct UrlFormatRule;

struct UrlCollector {
    diagnostics: Vec<Diagnostic>,
}

impl Visitor for UrlCollector {
    fn visit_url(&mut self, path: &str, url: &str) {
        // Empty media slots are the required-fields rule's concern
        if url.is_empty() || is_valid_url(url) {
            return;
        }
        self.diagnostics.push(
            Diagnostic::error(RULE, format!("'{}' is not a valid URL", url))
                .at_field(path)
                .with_suggestion("Use an absolute https:// URL, a path starting with '/', or an #anchor"),
        );
    }
}

impl ValidationRule for UrlFormatRule {
    fn name(&self) -> &'static str {
        RULE
    }

    fn description(&self) -> &'static str {
        "Require well-formed link, image and video URLs"
    }

    fn check_section(&self, section: &Section) -> Vec<Diagnostic> {
        let mut collector = UrlCollector {
            diagnostics: Vec::new(),
        };
        walk_section(&mut collector, section);
        collector.diagnostics
    }

    fn check_page(&self, page: &Page) -> Vec<Diagnostic> {
        let mut collector = UrlCollector {
            diagnostics: Vec::new(),
        };
        if let Some(image) = &page.meta.social_image {
            collector.visit_url("meta.social_image", image);
        }
        collector.diagnostics
    }
}
