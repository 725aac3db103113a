pub mod export;
pub mod init;
pub mod new;
pub mod templates;
pub mod validate;

pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use new::{new_page, NewArgs};
pub use templates::{templates, TemplatesArgs};
pub use validate::{validate, ValidateArgs};

use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const PAGE_EXTENSION: &str = ".page.json";

/// Resolve a path argument to the page files it names: the file itself, or
/// every `*.page.json` below a directory
pub fn find_page_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(PAGE_EXTENSION))
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();

    Ok(files)
}

/// `home.page.json` → `home`
pub fn page_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("page");
    name.strip_suffix(PAGE_EXTENSION)
        .or_else(|| name.strip_suffix(".json"))
        .unwrap_or(name)
        .to_string()
}
