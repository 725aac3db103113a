use super::find_page_files;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use pagecraft_editor::transfer::parse_page;
use pagecraft_schema::{validate_page, Diagnostic, DiagnosticLevel, ValidateOptions};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Page file or directory (defaults to the configured pages directory)
    pub path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .count()
    }
}

/// Validate page files. `verbose` includes info-level findings.
pub fn validate(args: ValidateArgs, verbose: bool, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let root = args.path.unwrap_or_else(|| config.pages_dir(cwd));
    let files = find_page_files(&root)?;

    if files.is_empty() {
        if args.format == OutputFormat::Text {
            println!("{}", "⚠️  No page files found".yellow());
        } else {
            println!("[]");
        }
        return Ok(());
    }

    let min_level = if verbose {
        DiagnosticLevel::Info
    } else {
        DiagnosticLevel::Warning
    };
    let reports: Vec<FileReport> = files
        .iter()
        .map(|file| validate_file(file, min_level, &root))
        .collect();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => print_text(&reports),
    }

    let errors: usize = reports.iter().map(FileReport::error_count).sum();
    if errors > 0 {
        return Err(anyhow!("Validation failed with {} error(s)", errors));
    }

    Ok(())
}

fn validate_file(file: &Path, min_level: DiagnosticLevel, root: &Path) -> FileReport {
    let display = file
        .strip_prefix(root)
        .ok()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(file)
        .display()
        .to_string();

    let diagnostics = match fs::read_to_string(file)
        .map_err(|e| e.to_string())
        .and_then(|source| parse_page(&source).map_err(|e| e.to_string()))
    {
        Ok(page) => {
            let options = ValidateOptions {
                min_level: Some(min_level),
                ..ValidateOptions::default()
            };
            validate_page(&page, &options).into_diagnostics()
        }
        Err(message) => vec![Diagnostic::error("parse", message)],
    };

    FileReport {
        file: display,
        diagnostics,
    }
}

fn print_text(reports: &[FileReport]) {
    println!("{}", "🔍 Validating pages...".bright_blue().bold());

    for report in reports {
        if report.diagnostics.is_empty() {
            println!("  {} {}", "✓".green(), report.file);
            continue;
        }

        let marker = if report.error_count() > 0 {
            "✗".red()
        } else {
            "⚠".yellow()
        };
        println!("  {} {}", marker, report.file);
        for diagnostic in &report.diagnostics {
            let level = match diagnostic.level {
                DiagnosticLevel::Error => "error".red().bold(),
                DiagnosticLevel::Warning => "warning".yellow().bold(),
                DiagnosticLevel::Info => "info".blue().bold(),
            };
            println!("      {}: {}", level, diagnostic);
            if let Some(suggestion) = &diagnostic.suggestion {
                println!("        {} {}", "help:".cyan(), suggestion);
            }
        }
    }

    let errors: usize = reports.iter().map(FileReport::error_count).sum();
    let warnings: usize = reports.iter().map(FileReport::warning_count).sum();
    println!();
    if errors == 0 && warnings == 0 {
        println!(
            "{} {} page(s) valid",
            "✅".green(),
            reports.len()
        );
    } else {
        println!(
            "{} {} page(s), {} error(s), {} warning(s)",
            if errors > 0 { "❌".red() } else { "⚠️".yellow() },
            reports.len(),
            errors,
            warnings
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{Page, Section, SectionKind};

    fn write(dir: &Path, name: &str, page: &Page) {
        fs::write(dir.join(name), serde_json::to_string(page).unwrap()).unwrap();
    }

    fn args(path: &Path) -> ValidateArgs {
        ValidateArgs {
            path: Some(path.to_path_buf()),
            format: OutputFormat::Json,
        }
    }

    #[test]
    fn test_valid_pages_pass() {
        let dir = tempfile::tempdir().unwrap();
        let mut page = Page::new("home", "Home");
        page.sections.push(Section::new("hero", SectionKind::Hero));
        write(dir.path(), "home.page.json", &page);

        validate(args(dir.path()), false, dir.path()).unwrap();
    }

    #[test]
    fn test_duplicate_ids_fail() {
        let dir = tempfile::tempdir().unwrap();
        let mut page = Page::new("home", "Home");
        page.sections.push(Section::new("hero", SectionKind::Hero));
        page.sections.push(Section::new("hero", SectionKind::Faq));
        write(dir.path(), "home.page.json", &page);

        assert!(validate(args(dir.path()), false, dir.path()).is_err());
    }

    #[test]
    fn test_unparseable_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("broken.page.json");
        fs::write(&file, "{ not json").unwrap();

        let report = validate_file(&file, DiagnosticLevel::Warning, dir.path());
        assert_eq!(report.file, "broken.page.json");
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.diagnostics[0].rule, "parse");
    }
}
