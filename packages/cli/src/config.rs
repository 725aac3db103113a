use pagecraft_compiler_html::CompileOptions;
use pagecraft_editor::{PageBuilderStore, DEFAULT_MAX_LEVELS};
use pagecraft_model::Page;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding `*.page.json` documents
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// Directory HTML exports are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Template used by `new` when none is given
    #[serde(default = "default_template")]
    pub default_template: String,

    /// Undo levels kept by editing stores (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default)]
    pub html: HtmlConfig,
}

fn default_pages_dir() -> String {
    "pages".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_template() -> String {
    "landing".to_string()
}

fn default_history_limit() -> usize {
    DEFAULT_MAX_LEVELS
}

fn default_true() -> bool {
    true
}

fn default_indent() -> String {
    "  ".to_string()
}

/// HTML export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlConfig {
    #[serde(default = "default_true")]
    pub pretty: bool,

    #[serde(default = "default_indent")]
    pub indent: String,

    #[serde(default = "default_true")]
    pub animations: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: default_indent(),
            animations: true,
        }
    }
}

impl HtmlConfig {
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            pretty: self.pretty,
            indent: self.indent.clone(),
            animations: self.animations,
            ..CompileOptions::default()
        }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn pages_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.pages_dir)
    }

    pub fn out_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }

    /// Editing store over `page` with the configured history depth
    pub fn store(&self, page: Page) -> PageBuilderStore {
        PageBuilderStore::new(page).with_history_limit(self.history_limit)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            out_dir: default_out_dir(),
            default_template: default_template(),
            history_limit: default_history_limit(),
            html: HtmlConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "pagesDir": "content",
            "outDir": "public",
            "defaultTemplate": "saas",
            "historyLimit": 10,
            "html": { "pretty": false, "animations": false }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.pages_dir, "content");
        assert_eq!(config.out_dir, "public");
        assert_eq!(config.default_template, "saas");
        assert_eq!(config.history_limit, 10);
        assert!(!config.html.pretty);
        assert_eq!(config.html.indent, "  ");
        assert!(!config.html.animations);
    }

    #[test]
    fn test_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.pages_dir, "pages");
        assert_eq!(config.out_dir, "dist");
        assert_eq!(config.default_template, "landing");
        assert_eq!(config.history_limit, 50);
    }

    #[test]
    fn test_store_uses_history_limit() {
        let config = Config {
            history_limit: 3,
            ..Config::default()
        };
        let store = config.store(Page::new("home", "Home"));
        assert_eq!(store.history().max_levels(), 3);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_compile_options_from_html_config() {
        let html = HtmlConfig {
            pretty: false,
            indent: "\t".to_string(),
            animations: false,
        };
        let options = html.compile_options();
        assert!(!options.pretty);
        assert_eq!(options.indent, "\t");
        assert!(options.standalone);
    }
}
