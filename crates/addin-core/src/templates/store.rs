//! Local template store
//!
//! Templates live in a directory tree: a root `template.yaml` listing the
//! available templates, and one subdirectory per template carrying its own
//! `template.yaml` descriptor plus the files to copy. The store only reads
//! local directories; there is no remote fetching.

use super::manifest::{RootManifest, TemplateManifest};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Store over a local template directory
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    /// Open a store at an explicit directory
    pub fn open(root: PathBuf) -> Result<Self> {
        if !root.is_dir() {
            anyhow::bail!("Template directory not found: {}", root.display());
        }
        Ok(Self { root })
    }

    /// Locate the default template directory: `templates/` next to the
    /// executable, falling back to `templates/` in the working directory.
    pub fn discover() -> Result<Self> {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let beside = dir.join("templates");
                if beside.is_dir() {
                    return Self::open(beside);
                }
            }
        }

        let local = PathBuf::from("templates");
        if local.is_dir() {
            return Self::open(local);
        }

        anyhow::bail!(
            "No template directory found. Pass one with --template-dir or run \
             from a checkout containing templates/"
        );
    }

    /// The store's root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of a named template
    pub fn template_dir(&self, template_name: &str) -> PathBuf {
        self.root.join(template_name)
    }

    /// Read the root descriptor listing available templates
    pub fn root_manifest(&self) -> Result<RootManifest> {
        let path = self.root.join("template.yaml");
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content).context("Failed to parse root template.yaml")
    }

    /// Read a template's descriptor
    pub fn template_manifest(&self, template_name: &str) -> Result<TemplateManifest> {
        let path = self.template_dir(template_name).join("template.yaml");
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse template '{}' descriptor", template_name))
    }

    /// Load every listed template's descriptor, in listing order
    pub fn list_templates(&self) -> Result<Vec<(String, TemplateManifest)>> {
        let root_manifest = self.root_manifest()?;
        let mut templates = Vec::new();
        for template_name in &root_manifest.templates {
            let manifest = self.template_manifest(template_name)?;
            templates.push((template_name.clone(), manifest));
        }
        Ok(templates)
    }

    /// Read one template file's raw bytes
    pub fn read_file(&self, template_name: &str, file_path: &str) -> Result<Vec<u8>> {
        let path = self.template_dir(template_name).join(file_path);
        std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Verify that every file the descriptor lists exists on disk, and
    /// report files on disk the descriptor does not list.
    pub fn verify_template(&self, template_name: &str) -> Result<TemplateAudit> {
        let manifest = self.template_manifest(template_name)?;
        let dir = self.template_dir(template_name);

        let mut on_disk = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1) {
            let entry = entry
                .with_context(|| format!("Failed to walk template '{}'", template_name))?;
            if entry.file_type().is_file() {
                let relative = entry
                    .path()
                    .strip_prefix(&dir)
                    .unwrap_or(entry.path())
                    .to_string_lossy()
                    .replace('\\', "/");
                if relative != "template.yaml" {
                    on_disk.push(relative);
                }
            }
        }

        let missing: Vec<String> = manifest
            .files
            .iter()
            .filter(|f| !on_disk.iter().any(|d| d == *f))
            .cloned()
            .collect();
        let unlisted: Vec<String> = on_disk
            .into_iter()
            .filter(|d| !manifest.files.iter().any(|f| f == d))
            .collect();

        Ok(TemplateAudit { missing, unlisted })
    }
}

/// Result of checking a template's descriptor against its directory
#[derive(Debug, Clone)]
pub struct TemplateAudit {
    /// Listed in the descriptor but absent on disk
    pub missing: Vec<String>,
    /// Present on disk but not listed (will never be copied)
    pub unlisted: Vec<String>,
}

impl TemplateAudit {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unlisted.is_empty()
    }
}
