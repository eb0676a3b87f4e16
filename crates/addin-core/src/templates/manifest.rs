//! Template descriptor types and parsing

use serde::{Deserialize, Serialize};

/// Root template descriptor (templates/template.yaml)
/// Lists available template directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootManifest {
    /// List of template directory names
    pub templates: Vec<String>,
}

/// Per-template descriptor (templates/<name>/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Path of the add-in manifest file to patch after copying,
    /// relative to the template root
    #[serde(default)]
    pub manifest: Option<String>,

    /// Host names offered as the default selection for this template
    #[serde(default)]
    pub hosts: Vec<String>,

    /// Explicit list of files to copy
    pub files: Vec<String>,
}

impl TemplateManifest {
    /// Check if a host is part of this template's default selection
    pub fn offers_host(&self, host: &str) -> bool {
        self.hosts.iter().any(|h| h.eq_ignore_ascii_case(host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_template_manifest() {
        let yaml = "\
name: Task Pane\n\
description: Task pane add-in with static assets\n\
version: 0.2.0\n\
manifest: manifest.xml\n\
hosts:\n\
  - Document\n\
  - Workbook\n\
files:\n\
  - manifest.xml\n\
  - package.json\n\
  - src/taskpane.html\n";
        let manifest: TemplateManifest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(manifest.name, "Task Pane");
        assert_eq!(manifest.manifest.as_deref(), Some("manifest.xml"));
        assert_eq!(manifest.files.len(), 3);
        assert!(manifest.offers_host("document"));
        assert!(!manifest.offers_host("Mail"));
    }

    #[test]
    fn test_optional_fields_default() {
        let yaml = "\
name: Minimal\n\
description: No manifest patching\n\
version: 0.1.0\n\
files:\n\
  - README.md\n";
        let manifest: TemplateManifest = serde_yaml::from_str(yaml).unwrap();
        assert!(manifest.manifest.is_none());
        assert!(manifest.hosts.is_empty());
    }

    #[test]
    fn test_parse_root_manifest() {
        let yaml = "templates:\n  - taskpane\n  - mail\n";
        let root: RootManifest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(root.templates, vec!["taskpane", "mail"]);
    }
}
