use crate::page::GlobalStyles;
use crate::section::Section;
use pagecraft_common::CommonError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Blank,
    Landing,
    Ecommerce,
    Saas,
    Portfolio,
    About,
}

impl TemplateCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::Blank => "blank",
            TemplateCategory::Landing => "landing",
            TemplateCategory::Ecommerce => "ecommerce",
            TemplateCategory::Saas => "saas",
            TemplateCategory::Portfolio => "portfolio",
            TemplateCategory::About => "about",
        }
    }
}

impl FromStr for TemplateCategory {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blank" => Ok(TemplateCategory::Blank),
            "landing" => Ok(TemplateCategory::Landing),
            "ecommerce" => Ok(TemplateCategory::Ecommerce),
            "saas" => Ok(TemplateCategory::Saas),
            "portfolio" => Ok(TemplateCategory::Portfolio),
            "about" => Ok(TemplateCategory::About),
            other => Err(CommonError::unknown("template category", other)),
        }
    }
}

/// Named, ordered list of pre-built sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: TemplateCategory,
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Theme applied alongside the sections when the template replaces a page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_styles: Option<GlobalStyles>,
}
