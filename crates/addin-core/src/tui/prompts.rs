//! Charm-style CLI prompts using cliclack

use crate::answers::{Host, ProjectAnswers, ALL_HOSTS};
use crate::manifest::{manifest_directives, transform};
use crate::runtime::{check, installer};
use crate::templates::{copier, store::TemplateStore, version, TemplateManifest};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Directory to load templates from instead of the bundled ones
    pub template_dir: Option<PathBuf>,

    /// Template name to use
    pub template: Option<String>,

    /// Project display name
    pub name: Option<String>,

    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// Host applications the add-in should target
    pub hosts: Option<Vec<String>>,

    /// Skip dependency installation
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro("Add-in Scaffolder")?;

    // Step 1: Resolve the template store
    let store = setup_store(&args.template_dir)?;

    // Step 2: Select template
    let (template_name, manifest) = select_template(&store, args.template.as_deref())?;

    // Check version compatibility
    if let Some(warning) = version::check_compatibility(cli_version, &manifest.version) {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }

    // Step 3: Project name
    let project_name = select_name(&args)?;

    // Step 4: Destination directory
    let project_dir = select_directory(&args, &project_name)?;

    // Step 5: Target hosts
    let hosts = select_hosts(&manifest, &args)?;

    // Step 6: Freeze the answers record; everything downstream reads it
    let answers = ProjectAnswers::new(project_name, hosts, template_name.clone(), project_dir);

    // Step 7: Create project (copy + manifest patch)
    create_project(&store, &template_name, &manifest, &answers).await?;

    // Step 8: Install dependencies
    let installed = handle_install(&answers, &args).await?;

    // Step 9: Show next steps
    print_next_steps(&answers, installed)?;

    Ok(())
}

fn setup_store(template_dir: &Option<PathBuf>) -> Result<TemplateStore> {
    let store = match template_dir {
        Some(path) => {
            cliclack::log::info(format!("Using templates from {}", path.display()))?;
            TemplateStore::open(path.clone())?
        }
        None => TemplateStore::discover()?,
    };

    Ok(store)
}

fn select_template(
    store: &TemplateStore,
    specified_template: Option<&str>,
) -> Result<(String, TemplateManifest)> {
    let spinner = cliclack::spinner();
    spinner.start("Loading templates...");

    let templates = store.list_templates()?;

    // If a template was specified via --template flag, use it directly
    if let Some(template_name) = specified_template {
        match templates.iter().find(|(name, _)| name == template_name) {
            Some((name, manifest)) => {
                spinner.stop(format!("Template: {} - {}", manifest.name, manifest.description));
                return Ok((name.clone(), manifest.clone()));
            }
            None => {
                spinner.stop("Failed to load templates");
                let available: Vec<&str> =
                    templates.iter().map(|(name, _)| name.as_str()).collect();
                anyhow::bail!(
                    "Template '{}' not found. Available templates: {}",
                    template_name,
                    available.join(", ")
                );
            }
        }
    }

    spinner.stop("Templates loaded");

    if templates.is_empty() {
        anyhow::bail!("No templates found.");
    }

    // If only one template, use it automatically
    if templates.len() == 1 {
        let (name, manifest) = templates.into_iter().next().unwrap();
        cliclack::log::info(format!(
            "Using template: {} - {}",
            manifest.name, manifest.description
        ))?;
        return Ok((name, manifest));
    }

    // Build select prompt - use indices to avoid borrow issues
    let mut select = cliclack::select("Select a template");
    for (idx, (_, manifest)) in templates.iter().enumerate() {
        select = select.item(idx, &manifest.name, &manifest.description);
    }

    let selected_idx: usize = select.interact()?;
    let (name, manifest) = templates.into_iter().nth(selected_idx).unwrap();

    Ok((name, manifest))
}

fn select_name(args: &CreateArgs) -> Result<String> {
    if let Some(name) = &args.name {
        cliclack::log::info(format!("Project name: {}", name))?;
        return Ok(name.clone());
    }

    if args.yes {
        return Ok("My Add-in".to_string());
    }

    let name: String = cliclack::input("Project name")
        .placeholder("My Add-in")
        .default_input("My Add-in")
        .interact()?;

    Ok(name)
}

fn select_directory(args: &CreateArgs, project_name: &str) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Use --directory flag if provided
    let path = if let Some(dir) = &args.directory {
        let p = if dir.is_absolute() {
            dir.clone()
        } else {
            current_dir.join(dir)
        };
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else {
        let suggested = slugify(project_name);
        if args.yes {
            current_dir.join(&suggested)
        } else {
            let input: String = cliclack::input("Project directory")
                .placeholder(&suggested)
                .default_input(&suggested)
                .interact()?;

            if input.is_empty() || input == "." {
                current_dir
            } else {
                let p = PathBuf::from(&input);
                if p.is_absolute() {
                    p
                } else {
                    current_dir.join(p)
                }
            }
        }
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != std::path::Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    // Warn if directory exists and has files
    if path.exists() && path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(&path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!("Directory has {} existing items", count))?;

                // Auto-confirm with --yes flag
                let confirm = if args.yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(path)
}

/// Directory name suggested from the project name
fn slugify(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "my-addin".to_string()
    } else {
        slug
    }
}

fn select_hosts(manifest: &TemplateManifest, args: &CreateArgs) -> Result<Vec<Host>> {
    // A template without a host section never prompts
    if manifest.hosts.is_empty() {
        return Ok(Vec::new());
    }

    let defaults: Vec<Host> = manifest
        .hosts
        .iter()
        .filter_map(|name| Host::parse(name))
        .collect();

    let selected = if let Some(host_args) = &args.hosts {
        let mut hosts = Vec::new();
        for host_str in host_args {
            match Host::parse(host_str) {
                Some(host) => {
                    if !manifest.offers_host(host.name()) {
                        cliclack::log::warning(format!(
                            "Host {} is not part of this template's default set",
                            host.name()
                        ))?;
                    }
                    if !hosts.contains(&host) {
                        hosts.push(host);
                    }
                }
                None => {
                    cliclack::log::warning(format!("Unknown host: {}", host_str))?;
                }
            }
        }
        hosts
    } else if args.yes {
        defaults.clone()
    } else {
        let mut multi = cliclack::multiselect("Select target hosts");
        for host in ALL_HOSTS {
            multi = multi.item(host, host.name(), "");
        }
        multi.initial_values(defaults.clone()).interact()?
    };

    if selected.is_empty() {
        anyhow::bail!("No hosts selected for this template.");
    }

    let host_names: Vec<&str> = selected.iter().map(Host::name).collect();
    cliclack::log::success(format!("Target hosts: {}", host_names.join(", ")))?;

    Ok(selected)
}

async fn create_project(
    store: &TemplateStore,
    template_name: &str,
    manifest: &TemplateManifest,
    answers: &ProjectAnswers,
) -> Result<()> {
    // Surface descriptor drift before copying; a listed-but-missing file
    // would otherwise fail halfway through the copy
    let audit = store.verify_template(template_name)?;
    if !audit.missing.is_empty() {
        cliclack::log::warning(format!(
            "Template lists files that do not exist: {}",
            audit.missing.join(", ")
        ))?;
    }

    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    // Copy template files
    let copied_files = copier::copy_template(
        store,
        template_name,
        manifest,
        &answers.directory,
        answers,
    )
    .await?;

    // Patch the copied add-in manifest with the answers
    if let Some(manifest_file) = &manifest.manifest {
        patch_manifest(answers, manifest_file).await?;
    }

    spinner.stop(format!(
        "Created {} files in {}",
        copied_files.len(),
        answers.directory.display()
    ));

    Ok(())
}

/// Read the copied manifest, run the transformation pipeline, and overwrite
/// it in place. Any pipeline failure aborts the run: a half-patched
/// manifest would be rejected by the consuming host anyway.
async fn patch_manifest(answers: &ProjectAnswers, manifest_file: &str) -> Result<()> {
    let path = answers.directory.join(manifest_file);
    let input = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

    let directives = manifest_directives(answers);
    let output = transform(&input, &directives)
        .with_context(|| format!("Failed to patch manifest: {}", path.display()))?;

    tokio::fs::write(&path, output)
        .await
        .with_context(|| format!("Failed to write manifest: {}", path.display()))?;

    Ok(())
}

/// Returns true when dependencies were installed
async fn handle_install(answers: &ProjectAnswers, args: &CreateArgs) -> Result<bool> {
    if args.skip_install {
        cliclack::log::info("Skipping dependency installation")?;
        return Ok(false);
    }

    // package.json is the installer's contract; without one there is
    // nothing to install
    if !answers.directory.join("package.json").exists() {
        return Ok(false);
    }

    let runtimes = check::check_runtimes();
    let all_available = runtimes.iter().all(|r| r.available);
    let summary: Vec<String> = runtimes.iter().map(ToString::to_string).collect();
    cliclack::log::info(format!("Detected runtimes: {}", summary.join(", ")))?;

    if !all_available {
        cliclack::log::warning("Node.js and npm are required to install dependencies")?;

        if args.yes {
            cliclack::log::info("Continuing without installing dependencies (--yes mode)")?;
            return Ok(false);
        }

        let action: &str = cliclack::select("What would you like to do?")
            .item("docs", format!("Open the Node.js download page ({})", installer::NODE_DOCS_URL), "")
            .item("skip", "Skip and continue without installing", "")
            .interact()?;

        if action == "docs" {
            installer::open_node_docs()?;
        }
        cliclack::log::info(format!(
            "Run `npm install` in {} after installing Node.js",
            answers.directory.display()
        ))?;
        return Ok(false);
    }

    let confirm = if args.yes {
        true
    } else {
        cliclack::confirm("Install dependencies now?")
            .initial_value(true)
            .interact()?
    };

    if !confirm {
        return Ok(false);
    }

    match installer::install_dependencies(&answers.directory).await {
        Ok(()) => {
            cliclack::log::success("Dependencies installed")?;
            Ok(true)
        }
        Err(e) => {
            // The scaffold is already on disk; a failed install is
            // recoverable by hand
            cliclack::log::error(format!("{}", e))?;
            Ok(false)
        }
    }
}

fn print_next_steps(answers: &ProjectAnswers, installed: bool) -> Result<()> {
    let mut steps = Vec::new();
    let current = std::env::current_dir().ok();

    if current.as_ref() != Some(&answers.directory) {
        steps.push(format!("cd {}", answers.directory.display()));
    }
    if !installed {
        steps.push("npm install".to_string());
    }
    steps.push("Open README.md to get started".to_string());

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_project_names() {
        assert_eq!(slugify("My Add-in"), "my-add-in");
        assert_eq!(slugify("Contoso Mail Helper"), "contoso-mail-helper");
        assert_eq!(slugify("---"), "my-addin");
        assert_eq!(slugify(""), "my-addin");
    }
}
