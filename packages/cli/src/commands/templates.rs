use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::TemplateLibrary;
use pagecraft_model::{Template, TemplateCategory};

#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Only list templates in this category
    #[arg(short, long)]
    pub category: Option<TemplateCategory>,

    /// Print the templates as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn templates(args: TemplatesArgs) -> Result<()> {
    let library = TemplateLibrary::builtin();
    let selected: Vec<&Template> = library
        .list()
        .iter()
        .filter(|t| args.category.map_or(true, |c| t.category == c))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    if selected.is_empty() {
        println!("{}", "No templates found".yellow());
        return Ok(());
    }

    println!("{}", "📐 Built-in templates".bright_blue().bold());
    for template in selected {
        println!(
            "  {} {} {}",
            template.id.bright_white().bold(),
            format!("[{}]", template.category.as_str()).dimmed(),
            format!("{} sections", template.sections.len()).dimmed()
        );
        println!("      {}", template.name);
        if !template.description.is_empty() {
            println!("      {}", template.description.dimmed());
        }
    }

    Ok(())
}
