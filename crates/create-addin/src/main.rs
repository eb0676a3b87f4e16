//! create-addin CLI - Project scaffolding for host-application add-ins

use addin_core::tui::CreateArgs;
use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "create-addin")]
#[command(about = "CLI for scaffolding host-application add-in projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new add-in project
    Create(CliCreateArgs),
    /// List the available templates
    Templates(TemplatesArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Directory to load templates from instead of the bundled ones
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Template name to use
    #[arg(short, long)]
    pub template: Option<String>,

    /// Project display name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Project directory to create
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Target hosts (comma-separated: document,workbook,mail,...)
    #[arg(long, value_delimiter = ',')]
    pub hosts: Option<Vec<String>>,

    /// Skip dependency installation
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            template: args.template,
            name: args.name,
            directory: args.directory,
            hosts: args.hosts,
            skip_install: args.skip_install,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct TemplatesArgs {
    /// Directory to load templates from instead of the bundled ones
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

/// Print the available templates with their target hosts
fn list_templates(args: &TemplatesArgs) -> Result<()> {
    let store = match &args.template_dir {
        Some(path) => addin_core::TemplateStore::open(path.clone())?,
        None => addin_core::TemplateStore::discover()?,
    };

    let templates = store.list_templates()?;
    println!(
        "{}",
        format!("{} template(s) in {}", templates.len(), store.root().display()).bold()
    );
    println!();

    for (name, manifest) in &templates {
        println!("  {} - {}", name.cyan().bold(), manifest.description);
        if !manifest.hosts.is_empty() {
            println!("    hosts: {}", manifest.hosts.join(", ").dimmed());
        }

        // Flag descriptor drift so template authors catch it early
        let audit = store.verify_template(name)?;
        if !audit.is_clean() {
            for file in &audit.missing {
                println!("    {} listed but missing: {}", "warning:".yellow(), file);
            }
            for file in &audit.unlisted {
                println!("    {} on disk but never copied: {}", "warning:".yellow(), file);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    match args.command {
        Some(Command::Create(create_args)) => {
            let result = addin_core::run(create_args.into(), CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Some(Command::Templates(templates_args)) => list_templates(&templates_args),
        None => {
            // No subcommand provided, default to create behavior (interactive mode)
            let result = addin_core::run(CreateArgs::default(), CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
