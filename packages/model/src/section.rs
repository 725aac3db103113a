use crate::content::{SectionContent, SectionKind};
use crate::device::Device;
use crate::settings::SectionSettings;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// One block of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,

    /// Name shown in the layers panel
    #[serde(default)]
    pub name: String,

    pub content: SectionContent,

    #[serde(default)]
    pub settings: SectionSettings,

    /// Global toggle, independent of per-device visibility
    #[serde(default = "default_true")]
    pub visible: bool,

    /// Locked sections reject every edit except unlocking
    #[serde(default)]
    pub locked: bool,
}

impl Section {
    /// Create a section of `kind` with starter content
    pub fn new(id: impl Into<String>, kind: SectionKind) -> Self {
        Self::with_content(id, SectionContent::default_for(kind))
    }

    pub fn with_content(id: impl Into<String>, content: SectionContent) -> Self {
        Self {
            id: id.into(),
            name: content.kind().label().to_string(),
            content,
            settings: SectionSettings::default(),
            visible: true,
            locked: false,
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.content.kind()
    }

    /// Rendered on `device`: globally visible and not hidden at that breakpoint
    pub fn is_visible_on(&self, device: Device) -> bool {
        self.visible && self.settings.responsive.visible_on(device)
    }

    /// Copy with a new id; the copy is unlocked and named "<name> (copy)"
    pub fn duplicate(&self, new_id: impl Into<String>) -> Section {
        Section {
            id: new_id.into(),
            name: format!("{} (copy)", self.name),
            content: self.content.clone(),
            settings: self.settings.clone(),
            visible: self.visible,
            locked: false,
        }
    }
}
