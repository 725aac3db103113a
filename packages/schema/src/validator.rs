use crate::diagnostic::{Diagnostic, DiagnosticLevel};
use crate::rules::RuleRegistry;
use pagecraft_model::{Page, Section};
use serde::Serialize;

/// Options for configuring validation
#[derive(Debug, Default)]
pub struct ValidateOptions {
    /// Custom rule registry (uses the built-in rules if None)
    pub registry: Option<RuleRegistry>,

    /// Drop diagnostics less severe than this level
    pub min_level: Option<DiagnosticLevel>,
}

impl ValidateOptions {
    pub fn errors_only() -> Self {
        Self {
            registry: None,
            min_level: Some(DiagnosticLevel::Error),
        }
    }
}

/// Diagnostics produced by one validation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.level == DiagnosticLevel::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.level == DiagnosticLevel::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Only the error-level diagnostics, consuming the report
    pub fn into_errors(self) -> Vec<Diagnostic> {
        self.diagnostics.into_iter().filter(|d| d.is_error()).collect()
    }
}

fn with_registry<T>(options: &ValidateOptions, f: impl FnOnce(&RuleRegistry) -> T) -> T {
    match &options.registry {
        Some(registry) => f(registry),
        None => f(&RuleRegistry::default()),
    }
}

fn finish(mut diagnostics: Vec<Diagnostic>, options: &ValidateOptions) -> ValidationReport {
    if let Some(min) = options.min_level {
        diagnostics.retain(|d| d.level <= min);
    }
    ValidationReport { diagnostics }
}

fn check_section(section: &Section, registry: &RuleRegistry) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for rule in registry.rules() {
        diagnostics.extend(rule.check_section(section).into_iter().map(|d| {
            if d.section_id.is_none() {
                d.in_section(section.id.clone())
            } else {
                d
            }
        }));
    }
    diagnostics
}

/// Validate a single section in isolation
pub fn validate_section(section: &Section, options: &ValidateOptions) -> ValidationReport {
    let diagnostics = with_registry(options, |registry| check_section(section, registry));
    finish(diagnostics, options)
}

/// Validate every section plus the page-level rules
pub fn validate_page(page: &Page, options: &ValidateOptions) -> ValidationReport {
    let diagnostics = with_registry(options, |registry| {
        let mut diagnostics = Vec::new();

        for section in &page.sections {
            diagnostics.extend(check_section(section, registry));
        }

        for rule in registry.rules() {
            diagnostics.extend(rule.check_page(page));
        }

        diagnostics
    });

    let report = finish(diagnostics, options);
    tracing::debug!(
        page = %page.id,
        diagnostics = report.len(),
        errors = report.errors().count(),
        "validated page"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{SectionContent, SectionKind};

    #[test]
    fn test_default_sections_are_clean() {
        for kind in SectionKind::ALL {
            let section = Section::new("s", kind);
            let report = validate_section(&section, &ValidateOptions::default());
            assert!(!report.has_errors(), "{:?}: {:?}", kind, report);
        }
    }

    #[test]
    fn test_section_id_is_attached() {
        let mut section = Section::new("hero-1", SectionKind::Hero);
        if let SectionContent::Hero(hero) = &mut section.content {
            hero.headline.clear();
        }

        let report = validate_section(&section, &ValidateOptions::default());
        let error = report.errors().next().unwrap();
        assert_eq!(error.section_id.as_deref(), Some("hero-1"));
    }

    #[test]
    fn test_min_level_filters_warnings() {
        let mut section = Section::new("s", SectionKind::Hero);
        for device in pagecraft_model::Device::ALL {
            section.settings.responsive.for_device_mut(device).visible = false;
        }

        let all = validate_section(&section, &ValidateOptions::default());
        assert_eq!(all.warnings().count(), 1);

        let errors_only = validate_section(&section, &ValidateOptions::errors_only());
        assert!(errors_only.is_empty());
    }
}
