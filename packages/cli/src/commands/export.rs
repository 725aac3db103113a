use super::{find_page_files, page_stem};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_compiler_html::{compile_to_html, CompileOptions};
use pagecraft_editor::transfer::import_json;
use pagecraft_model::Device;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Page file or directory (defaults to the configured pages directory)
    pub path: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Render for one device only (desktop, tablet, mobile)
    #[arg(short, long)]
    pub device: Option<Device>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Emit a fragment (style + sections) instead of a full document
    #[arg(long)]
    pub fragment: bool,
}

pub fn export(args: ExportArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let root = args.path.clone().unwrap_or_else(|| config.pages_dir(cwd));
    let out_dir = args
        .out_dir
        .clone()
        .map(|dir| cwd.join(dir))
        .unwrap_or_else(|| config.out_dir(cwd));

    let options = CompileOptions {
        standalone: !args.fragment,
        device: args.device,
        ..config.html.compile_options()
    };

    let files = find_page_files(&root)?;
    if files.is_empty() {
        println!("{}", "⚠️  No page files found".yellow());
        return Ok(());
    }

    if args.stdout {
        for file in &files {
            print!("{}", export_file(file, &options)?);
        }
        return Ok(());
    }

    println!("{}", "🔨 Exporting pages...".bright_blue().bold());

    let mut success_count = 0;
    let mut error_count = 0;

    for file in &files {
        let relative = file.strip_prefix(&root).unwrap_or(file);
        let target = output_path(&out_dir, relative);

        match export_file(file, &options).and_then(|html| write_output(&target, &html)) {
            Ok(()) => {
                success_count += 1;
                println!(
                    "  {} {} → {}",
                    "✓".green(),
                    file.strip_prefix(cwd).unwrap_or(file).display(),
                    target.strip_prefix(cwd).unwrap_or(&target).display()
                );
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    file.strip_prefix(cwd).unwrap_or(file).display(),
                    e.to_string().red()
                );
            }
        }
    }

    println!();
    if error_count == 0 {
        println!(
            "{} Exported {} pages successfully",
            "✅".green(),
            success_count
        );
        Ok(())
    } else {
        Err(anyhow!(
            "Exported {} pages, {} failed",
            success_count,
            error_count
        ))
    }
}

fn export_file(file: &Path, options: &CompileOptions) -> Result<String> {
    let source = fs::read_to_string(file)?;
    let page = import_json(&source)?;
    Ok(compile_to_html(&page, options)?)
}

/// `blog/post.page.json` under `dist` → `dist/blog/post.html`
fn output_path(out_dir: &Path, relative: &Path) -> PathBuf {
    let name = format!("{}.html", page_stem(relative));
    match relative.parent() {
        Some(parent) => out_dir.join(parent).join(name),
        None => out_dir.join(name),
    }
}

fn write_output(target: &Path, html: &str) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(target, html)?;
    Ok(())
}
