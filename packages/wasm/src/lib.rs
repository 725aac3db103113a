use pagecraft_compiler_html::CompileOptions;
use pagecraft_editor::transfer::import_json;
use pagecraft_editor::{PageBuilderStore, TemplateLibrary, TemplateMode};
use pagecraft_model::{Device, Page, SectionContent, SectionKind, SectionSettings};
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(prefix: &str, e: impl Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", prefix, e))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse<T: FromStr>(value: &str) -> Result<T, JsValue>
where
    T::Err: Display,
{
    value.parse().map_err(|e: T::Err| js_error("Invalid argument", e))
}

fn from_json<'a, T: serde::Deserialize<'a>>(source: &'a str) -> Result<T, JsValue> {
    serde_json::from_str(source).map_err(|e| js_error("Parse error", e))
}

/// Page builder state for the editor UI
#[wasm_bindgen]
pub struct PageBuilder {
    store: PageBuilderStore,
}

#[wasm_bindgen]
impl PageBuilder {
    /// Start from an exported page, or an empty one
    #[wasm_bindgen(constructor)]
    pub fn new(page_json: Option<String>) -> Result<PageBuilder, JsValue> {
        let page = match page_json {
            Some(source) => import_json(&source).map_err(|e| js_error("Import error", e))?,
            None => Page::new("page", "Untitled"),
        };
        Ok(PageBuilder {
            store: PageBuilderStore::new(page),
        })
    }

    /// Current page as JSON
    pub fn page(&self) -> Result<String, JsValue> {
        to_json(self.store.page())
    }

    pub fn version(&self) -> f64 {
        self.store.version() as f64
    }

    /// Add a section of `kind` (e.g. "hero", "pricing"); returns its id
    #[wasm_bindgen(js_name = addSection)]
    pub fn add_section(&mut self, kind: &str, index: Option<usize>) -> Result<String, JsValue> {
        let kind: SectionKind = parse(kind)?;
        self.store
            .add_section(kind, index)
            .map_err(|e| js_error("Edit error", e))
    }

    #[wasm_bindgen(js_name = removeSection)]
    pub fn remove_section(&mut self, section_id: &str) -> Result<(), JsValue> {
        self.store
            .remove_section(section_id)
            .map_err(|e| js_error("Edit error", e))
    }

    #[wasm_bindgen(js_name = moveSection)]
    pub fn move_section(&mut self, section_id: &str, index: usize) -> Result<(), JsValue> {
        self.store
            .move_section(section_id, index)
            .map_err(|e| js_error("Edit error", e))
    }

    /// Returns the id of the copy
    #[wasm_bindgen(js_name = duplicateSection)]
    pub fn duplicate_section(&mut self, section_id: &str) -> Result<String, JsValue> {
        self.store
            .duplicate_section(section_id)
            .map_err(|e| js_error("Edit error", e))
    }

    /// `content_json` is a tagged `SectionContent` (`{"type": "hero", ...}`)
    #[wasm_bindgen(js_name = updateContent)]
    pub fn update_content(&mut self, section_id: &str, content_json: &str) -> Result<(), JsValue> {
        let content: SectionContent = from_json(content_json)?;
        self.store
            .update_content(section_id, content)
            .map_err(|e| js_error("Edit error", e))
    }

    #[wasm_bindgen(js_name = updateSettings)]
    pub fn update_settings(&mut self, section_id: &str, settings_json: &str) -> Result<(), JsValue> {
        let settings: SectionSettings = from_json(settings_json)?;
        self.store
            .update_settings(section_id, settings)
            .map_err(|e| js_error("Edit error", e))
    }

    #[wasm_bindgen(js_name = toggleVisibility)]
    pub fn toggle_visibility(&mut self, section_id: &str) -> Result<bool, JsValue> {
        self.store
            .toggle_visibility(section_id)
            .map_err(|e| js_error("Edit error", e))
    }

    pub fn select(&mut self, section_id: &str) -> Result<(), JsValue> {
        self.store
            .select(section_id)
            .map_err(|e| js_error("Selection error", e))
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.store.clear_selection();
    }

    pub fn selection(&self) -> Option<String> {
        self.store.selection().map(str::to_string)
    }

    #[wasm_bindgen(js_name = setDevice)]
    pub fn set_device(&mut self, device: &str) -> Result<(), JsValue> {
        let device: Device = parse(device)?;
        self.store.set_device(device);
        Ok(())
    }

    pub fn device(&self) -> String {
        self.store.device().as_str().to_string()
    }

    #[wasm_bindgen(js_name = togglePreview)]
    pub fn toggle_preview(&mut self) -> bool {
        self.store.toggle_preview()
    }

    /// Clamped zoom percentage actually applied
    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&mut self, percent: u16) -> u16 {
        self.store.set_zoom(percent)
    }

    pub fn undo(&mut self) -> Result<bool, JsValue> {
        self.store.undo().map_err(|e| js_error("Undo error", e))
    }

    pub fn redo(&mut self) -> Result<bool, JsValue> {
        self.store.redo().map_err(|e| js_error("Redo error", e))
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    #[wasm_bindgen(js_name = beginBatch)]
    pub fn begin_batch(&mut self, description: &str) {
        self.store.begin_batch(description);
    }

    #[wasm_bindgen(js_name = endBatch)]
    pub fn end_batch(&mut self) {
        self.store.end_batch();
    }

    /// `mode` is "replace" or "append"; returns the inserted ids as JSON
    #[wasm_bindgen(js_name = applyTemplate)]
    pub fn apply_template(&mut self, template_id: &str, mode: Option<String>) -> Result<String, JsValue> {
        let mode = match mode.as_deref() {
            None | Some("replace") => TemplateMode::Replace,
            Some("append") => TemplateMode::Append,
            Some(other) => {
                return Err(JsValue::from_str(&format!(
                    "Invalid argument: unknown template mode {}",
                    other
                )))
            }
        };
        let ids = self
            .store
            .apply_template_by_id(template_id, mode)
            .map_err(|e| js_error("Template error", e))?;
        to_json(&ids)
    }

    #[wasm_bindgen(js_name = exportJson)]
    pub fn export_json(&self) -> Result<String, JsValue> {
        self.store
            .export_json()
            .map_err(|e| js_error("Export error", e))
    }

    #[wasm_bindgen(js_name = importJson)]
    pub fn import_json(&mut self, source: &str) -> Result<(), JsValue> {
        self.store
            .import_json(source)
            .map_err(|e| js_error("Import error", e))
    }

    /// HTML export. `options_json` is a partial `CompileOptions`
    /// (`{"standalone": false, "device": "mobile"}`); defaults otherwise.
    #[wasm_bindgen(js_name = exportHtml)]
    pub fn export_html(&self, options_json: Option<String>) -> Result<String, JsValue> {
        let options: CompileOptions = match options_json.as_deref() {
            Some(source) => from_json(source)?,
            None => CompileOptions::default(),
        };
        self.store
            .export_html(&options)
            .map_err(|e| js_error("Export error", e))
    }

    /// HTML for the current preview device
    #[wasm_bindgen(js_name = previewHtml)]
    pub fn preview_html(&self) -> Result<String, JsValue> {
        self.store
            .preview_html()
            .map_err(|e| js_error("Export error", e))
    }

    /// Diagnostics as a JSON array
    pub fn validate(&self) -> Result<String, JsValue> {
        to_json(&self.store.validate())
    }
}

/// Built-in templates as JSON
#[wasm_bindgen(js_name = listTemplates)]
pub fn list_templates() -> Result<String, JsValue> {
    to_json(TemplateLibrary::builtin().list())
}

#[derive(Serialize)]
struct KindInfo {
    kind: &'static str,
    label: &'static str,
}

/// Section kinds the editor palette can offer, as JSON
#[wasm_bindgen(js_name = sectionKinds)]
pub fn section_kinds() -> Result<String, JsValue> {
    let kinds: Vec<KindInfo> = SectionKind::ALL
        .iter()
        .map(|kind| KindInfo {
            kind: kind.slug(),
            label: kind.label(),
        })
        .collect();
    to_json(&kinds)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn rejects_unknown_section_kind() {
        let mut builder = PageBuilder::new(None).unwrap();
        assert!(builder.add_section("carousel", None).is_err());
    }

    #[wasm_bindgen_test]
    fn rejects_bad_template_mode() {
        let mut builder = PageBuilder::new(None).unwrap();
        assert!(builder
            .apply_template("landing", Some("merge".to_string()))
            .is_err());
    }
}
