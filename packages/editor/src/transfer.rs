//! # Import / Export
//!
//! Pages travel as a JSON envelope:
//!
//! ```json
//! { "format": "pagecraft.page", "version": 1, "exported_at": "...", "page": { ... } }
//! ```
//!
//! Imports also accept a bare page object. Templates use the same envelope
//! shape with the `pagecraft.template` format and a `template` payload.

use chrono::{DateTime, Utc};
use pagecraft_model::{Page, Template};
use pagecraft_schema::{validate_page, Diagnostic, ValidateOptions};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

pub const PAGE_FORMAT: &str = "pagecraft.page";
pub const TEMPLATE_FORMAT: &str = "pagecraft.template";
pub const FORMAT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(u32),

    #[error("Page failed validation with {} error(s)", .0.len())]
    Invalid(Vec<Diagnostic>),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageEnvelope {
    pub format: String,
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub page: Page,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TemplateEnvelope {
    pub format: String,
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub template: Template,
}

fn check_valid(page: &Page) -> Result<(), TransferError> {
    let report = validate_page(page, &ValidateOptions::errors_only());
    if report.has_errors() {
        return Err(TransferError::Invalid(report.into_errors()));
    }
    Ok(())
}

fn check_header(value: &Value, expected: &str) -> Result<(), TransferError> {
    let format = value.get("format").and_then(Value::as_str).unwrap_or_default();
    if format != expected {
        return Err(TransferError::UnknownFormat(format.to_string()));
    }

    let version = value
        .get("version")
        .and_then(Value::as_u64)
        .unwrap_or_default();
    if version != FORMAT_VERSION as u64 {
        return Err(TransferError::UnsupportedVersion(
            u32::try_from(version).unwrap_or(u32::MAX),
        ));
    }
    Ok(())
}

/// Serialize a page into the export envelope. Pages with errors are rejected.
pub fn export_json(page: &Page) -> Result<String, TransferError> {
    check_valid(page)?;

    let envelope = PageEnvelope {
        format: PAGE_FORMAT.to_string(),
        version: FORMAT_VERSION,
        exported_at: Utc::now(),
        page: page.clone(),
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Parse an envelope or a bare page and validate it
pub fn import_json(source: &str) -> Result<Page, TransferError> {
    let page = parse_page(source)?;
    check_valid(&page)?;

    info!(
        page = %page.id,
        sections = page.sections.len(),
        "imported page"
    );
    Ok(page)
}

/// Parse without validation (used when loading documents from disk)
pub fn parse_page(source: &str) -> Result<Page, TransferError> {
    let value: Value = serde_json::from_str(source)?;

    if value.get("format").is_some() {
        check_header(&value, PAGE_FORMAT)?;
        let envelope: PageEnvelope = serde_json::from_value(value)?;
        Ok(envelope.page)
    } else {
        Ok(serde_json::from_value(value)?)
    }
}

pub fn export_template(template: &Template) -> Result<String, TransferError> {
    let envelope = TemplateEnvelope {
        format: TEMPLATE_FORMAT.to_string(),
        version: FORMAT_VERSION,
        exported_at: Utc::now(),
        template: template.clone(),
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Parse a template envelope or a bare template. Sections are validated
/// as a page would be.
pub fn import_template(source: &str) -> Result<Template, TransferError> {
    let value: Value = serde_json::from_str(source)?;

    let template: Template = if value.get("format").is_some() {
        check_header(&value, TEMPLATE_FORMAT)?;
        let envelope: TemplateEnvelope = serde_json::from_value(value)?;
        envelope.template
    } else {
        serde_json::from_value(value)?
    };

    let mut probe = Page::new(template.id.clone(), template.name.clone());
    probe.sections = template.sections.clone();
    if let Some(styles) = &template.global_styles {
        probe.global_styles = styles.clone();
    }
    check_valid(&probe)?;

    Ok(template)
}
