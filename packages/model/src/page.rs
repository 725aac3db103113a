use crate::ab_test::AbTest;
use crate::device::Device;
use crate::section::Section;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// SEO and social metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub social_image: Option<String>,
}

/// Theme shared by every section of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalStyles {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub text_color: String,
    pub background_color: String,
    pub heading_font: String,
    pub body_font: String,
    /// Base font size in px
    pub base_font_size: u8,
    /// Corner radius in px
    pub border_radius: u8,
    /// Max content width in px
    pub container_width: u32,
}

impl Default for GlobalStyles {
    fn default() -> Self {
        Self {
            primary_color: "#3366ff".to_string(),
            secondary_color: "#1f2937".to_string(),
            accent_color: "#f59e0b".to_string(),
            text_color: "#111827".to_string(),
            background_color: "#ffffff".to_string(),
            heading_font: "Inter, sans-serif".to_string(),
            body_font: "Inter, sans-serif".to_string(),
            base_font_size: 16,
            border_radius: 8,
            container_width: 1200,
        }
    }
}

/// A page under construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub slug: String,

    #[serde(default)]
    pub meta: PageMeta,

    #[serde(default)]
    pub global_styles: GlobalStyles,

    #[serde(default)]
    pub sections: Vec<Section>,

    #[serde(default)]
    pub ab_tests: Vec<AbTest>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Page {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();
        let now = Utc::now();
        Self {
            id: id.into(),
            slug: slugify(&title),
            meta: PageMeta {
                title: title.clone(),
                ..PageMeta::default()
            },
            title,
            global_styles: GlobalStyles::default(),
            sections: Vec::new(),
            ab_tests: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn find_section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn find_section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn contains_section(&self, id: &str) -> bool {
        self.position_of(id).is_some()
    }

    pub fn section_ids(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.id.as_str()).collect()
    }

    /// Sections rendered on `device`, in page order
    pub fn visible_sections(&self, device: Device) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(move |s| s.is_visible_on(device))
    }

    pub fn find_ab_test(&self, id: &str) -> Option<&AbTest> {
        self.ab_tests.iter().find(|t| t.id == id)
    }

    pub fn ab_tests_for_section<'a>(&'a self, section_id: &'a str) -> impl Iterator<Item = &'a AbTest> {
        self.ab_tests.iter().filter(move |t| t.section_id == section_id)
    }

    /// Mark the page as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Lowercase, ASCII alphanumerics joined by single dashes
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
