use super::new::write_page;
use super::PAGE_EXTENSION;
use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Template for the starter page
    #[arg(short, long, default_value = "landing")]
    pub template: String,

    /// Pages directory
    #[arg(short, long, default_value = "pages")]
    pub pages_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Pagecraft project...".bright_blue().bold()
    );

    let config = Config {
        pages_dir: args.pages_dir.clone(),
        default_template: args.template.clone(),
        ..Config::default()
    };

    let pages_dir = config.pages_dir(cwd);
    if !pages_dir.exists() {
        fs::create_dir_all(&pages_dir)?;
        println!("  {} Created {}/", "✓".green(), args.pages_dir);
    }

    let starter = pages_dir.join(format!("home{}", PAGE_EXTENSION));
    if !starter.exists() || args.force {
        write_page(&config, &starter, "home", "Home", &args.template)?;
        println!(
            "  {} Created home{} ({} template)",
            "✓".green(),
            PAGE_EXTENSION,
            args.template
        );
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/home{}", args.pages_dir, PAGE_EXTENSION);
    println!("  2. Run: pagecraft validate");
    println!("  3. Run: pagecraft export");

    Ok(())
}
