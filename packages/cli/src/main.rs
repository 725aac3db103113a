mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    export, init, new_page, templates, validate, ExportArgs, InitArgs, NewArgs, TemplatesArgs,
    ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - build, validate and export section-based pages
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output (debug logging, info-level findings)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Pagecraft project
    Init(InitArgs),

    /// Create a page from a template
    New(NewArgs),

    /// Validate page documents
    Validate(ValidateArgs),

    /// Export pages to HTML
    Export(ExportArgs),

    /// List built-in templates
    Templates(TemplatesArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("PAGECRAFT_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::New(args) => new_page(args, &cwd),
        Command::Validate(args) => validate(args, cli.verbose, &cwd),
        Command::Export(args) => export(args, &cwd),
        Command::Templates(args) => templates(args),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
