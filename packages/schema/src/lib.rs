//! # Pagecraft Schema
//!
//! Validation layer for sections and pages. Every rule implements
//! [`ValidationRule`]; the [`RuleRegistry`] holds the built-in set.
//! The editor runs [`validate_section`] before accepting content changes
//! and [`validate_page`] before import and export.

mod diagnostic;
mod rules;
mod validator;

pub use diagnostic::{Diagnostic, DiagnosticLevel};
pub use rules::{
    AbTestTargetsRule, AnimationBoundsRule, ColorFormatRule, HiddenEverywhereRule,
    ItemLimitsRule, RequiredFieldsRule, RuleRegistry, UniqueAnchorsRule, UniqueSectionIdsRule,
    UrlFormatRule, ValidationRule,
};
pub use validator::{validate_page, validate_section, ValidateOptions, ValidationReport};
