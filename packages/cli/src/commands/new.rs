use super::PAGE_EXTENSION;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::TemplateMode;
use pagecraft_model::page::slugify;
use pagecraft_model::Page;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Page name (also used as the file name)
    pub name: String,

    /// Template to start from (defaults to the config's defaultTemplate)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Overwrite an existing page
    #[arg(short, long)]
    pub force: bool,
}

pub fn new_page(args: NewArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let template = args
        .template
        .as_deref()
        .unwrap_or(&config.default_template);

    let slug = slugify(&args.name);
    if slug.is_empty() {
        return Err(anyhow!("Invalid page name: {:?}", args.name));
    }

    let path = config
        .pages_dir(cwd)
        .join(format!("{}{}", slug, PAGE_EXTENSION));
    if path.exists() && !args.force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }

    write_page(&config, &path, &slug, &args.name, template)?;

    println!(
        "  {} Created {} from template {}",
        "✓".green(),
        path.strip_prefix(cwd).unwrap_or(&path).display(),
        template.bright_white()
    );

    Ok(())
}

/// Build a page from a built-in template and write it as a page export
pub fn write_page(
    config: &Config,
    path: &Path,
    id: &str,
    title: &str,
    template: &str,
) -> Result<PathBuf> {
    let mut store = config.store(Page::new(id, title));
    store.apply_template_by_id(template, TemplateMode::Replace)?;
    let json = store.export_json()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    tracing::info!(path = %path.display(), template, "wrote page");

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_editor::transfer::import_json;

    #[test]
    fn test_new_page_from_template() {
        let dir = tempfile::tempdir().unwrap();
        new_page(
            NewArgs {
                name: "Spring Sale".to_string(),
                template: Some("ecommerce-store".to_string()),
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        let path = dir.path().join("pages/spring-sale.page.json");
        let page = import_json(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(page.title, "Spring Sale");
        assert!(!page.sections.is_empty());
    }

    #[test]
    fn test_existing_page_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let args = || NewArgs {
            name: "home".to_string(),
            template: None,
            force: false,
        };
        new_page(args(), dir.path()).unwrap();
        assert!(new_page(args(), dir.path()).is_err());
        new_page(
            NewArgs {
                force: true,
                ..args()
            },
            dir.path(),
        )
        .unwrap();
    }

    #[test]
    fn test_unknown_template() {
        let dir = tempfile::tempdir().unwrap();
        let result = new_page(
            NewArgs {
                name: "home".to_string(),
                template: Some("nope".to_string()),
                force: false,
            },
            dir.path(),
        );
        assert!(result.is_err());
    }
}
