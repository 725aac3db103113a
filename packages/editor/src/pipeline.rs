//! # Preview Pipeline
//!
//! Coordinates Mutate → Render for a live preview.
//!
//! The Pipeline manages:
//! - Applying mutations
//! - Re-rendering HTML for the preview device
//! - Caching the last output so unchanged renders can be skipped

use crate::{Document, EditorError, Mutation};
use pagecraft_compiler_html::{compile_to_html, CompileOptions};
use pagecraft_model::Device;

/// Manages the edit → render pipeline
#[derive(Debug)]
pub struct Pipeline {
    document: Document,
    options: CompileOptions,
    last_html: Option<String>,
}

impl Pipeline {
    /// Pipeline rendering full HTML documents for the desktop preview
    pub fn new(document: Document) -> Self {
        Self::with_options(
            document,
            CompileOptions {
                device: Some(Device::Desktop),
                ..CompileOptions::default()
            },
        )
    }

    pub fn with_options(document: Document, options: CompileOptions) -> Self {
        Self {
            document,
            options,
            last_html: None,
        }
    }

    /// Apply mutation and re-render
    pub fn apply_mutation(&mut self, mutation: Mutation) -> Result<PipelineResult, EditorError> {
        let mutation_result = self.document.apply(mutation)?;
        let (html, changed) = self.render()?;

        Ok(PipelineResult {
            version: mutation_result.version,
            html,
            changed,
        })
    }

    /// Switch the preview device; the next render is always reported as changed
    pub fn set_device(&mut self, device: Device) {
        self.options.device = Some(device);
        self.last_html = None;
    }

    pub fn device(&self) -> Option<Device> {
        self.options.device
    }

    /// Full re-render (initial paint, recovery)
    pub fn full_render(&mut self) -> Result<String, EditorError> {
        let html = compile_to_html(self.document.page(), &self.options)?;
        self.last_html = Some(html.clone());
        Ok(html)
    }

    fn render(&mut self) -> Result<(String, bool), EditorError> {
        let html = compile_to_html(self.document.page(), &self.options)?;
        let changed = self.last_html.as_deref() != Some(html.as_str());
        self.last_html = Some(html.clone());
        Ok((html, changed))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn last_html(&self) -> Option<&str> {
        self.last_html.as_deref()
    }

    /// Clear the render cache (force a changed result on next mutation)
    pub fn clear_cache(&mut self) {
        self.last_html = None;
    }
}

/// Result of pipeline execution
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// New version number
    pub version: u64,

    /// Rendered preview
    pub html: String,

    /// False when the mutation did not change the rendered output
    pub changed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{BreakpointSettings, Page, Section, SectionKind};

    fn pipeline() -> Pipeline {
        let mut page = Page::new("home", "Home");
        page.sections.push(Section::new("hero", SectionKind::Hero));
        page.sections.push(Section::new("faq", SectionKind::Faq));
        Pipeline::new(Document::from_page(page))
    }

    #[test]
    fn test_pipeline_initial_render() {
        let mut pipeline = pipeline();
        let html = pipeline.full_render().unwrap();
        assert!(html.contains("Build something people love"));
        assert!(pipeline.last_html().is_some());
    }

    #[test]
    fn test_pipeline_mutation_increments_version() {
        let mut pipeline = pipeline();
        pipeline.full_render().unwrap();

        let result = pipeline
            .apply_mutation(Mutation::SetVisibility {
                section_id: "faq".to_string(),
                visible: false,
            })
            .unwrap();

        assert_eq!(result.version, 1);
        assert!(result.changed);
        assert!(!result.html.contains("Frequently asked questions"));
    }

    #[test]
    fn test_rename_does_not_change_output() {
        let mut pipeline = pipeline();
        pipeline.full_render().unwrap();

        let result = pipeline
            .apply_mutation(Mutation::RenameSection {
                section_id: "hero".to_string(),
                name: "Top of page".to_string(),
            })
            .unwrap();
        assert!(!result.changed);
    }

    #[test]
    fn test_device_switch_filters_sections() {
        let mut pipeline = pipeline();
        pipeline
            .apply_mutation(Mutation::SetResponsive {
                section_id: "faq".to_string(),
                device: Device::Mobile,
                settings: BreakpointSettings {
                    visible: false,
                    ..BreakpointSettings::default()
                },
            })
            .unwrap();

        assert!(pipeline.full_render().unwrap().contains("Frequently asked questions"));

        pipeline.set_device(Device::Mobile);
        assert!(!pipeline.full_render().unwrap().contains("Frequently asked questions"));
    }
}
