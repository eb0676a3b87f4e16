//! Template file copying with placeholder substitution

use crate::answers::ProjectAnswers;
use crate::templates::manifest::TemplateManifest;
use crate::templates::store::TemplateStore;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// File extensions treated as text for placeholder substitution
const TEXT_EXTENSIONS: &[&str] = &[
    "css", "html", "htm", "js", "json", "jsx", "md", "ts", "tsx", "txt", "xml", "yaml", "yml",
];

/// Copy template files to the target directory, substituting placeholders
/// in text files. Returns the list of copied files.
pub async fn copy_template(
    store: &TemplateStore,
    template_name: &str,
    manifest: &TemplateManifest,
    target_dir: &Path,
    answers: &ProjectAnswers,
) -> Result<Vec<String>> {
    // Ensure target directory exists
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut copied_files = Vec::new();

    for file_path in &manifest.files {
        // Ensure parent directories exist
        let target_path = target_dir.join(file_path);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = store.read_file(template_name, file_path)?;
        let content = if is_text_file(file_path) {
            let text = String::from_utf8(content)
                .with_context(|| format!("Template file is not valid UTF-8: {}", file_path))?;
            substitute_placeholders(&text, answers).into_bytes()
        } else {
            content
        };

        fs::write(&target_path, &content)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        copied_files.push(file_path.clone());
    }

    Ok(copied_files)
}

/// Replace `{{projectName}}` and `{{projectId}}` tokens
fn substitute_placeholders(content: &str, answers: &ProjectAnswers) -> String {
    content
        .replace("{{projectName}}", &answers.name)
        .replace("{{projectId}}", &answers.id)
}

/// Substitution only applies to known text formats; everything else is
/// copied byte-for-byte
fn is_text_file(file_path: &str) -> bool {
    Path::new(file_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TEXT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn answers() -> ProjectAnswers {
        ProjectAnswers {
            name: "My Project".to_string(),
            id: "abc-123".to_string(),
            hosts: Vec::new(),
            template: "taskpane".to_string(),
            directory: PathBuf::from("/tmp/out"),
        }
    }

    #[test]
    fn test_substitute_placeholders() {
        let content = "{\n  \"name\": \"{{projectName}}\",\n  \"id\": \"{{projectId}}\"\n}";
        let out = substitute_placeholders(content, &answers());
        assert!(out.contains("\"My Project\""));
        assert!(out.contains("\"abc-123\""));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_substitute_leaves_plain_content() {
        let content = "body { margin: 0; }";
        assert_eq!(substitute_placeholders(content, &answers()), content);
    }

    #[test]
    fn test_is_text_file() {
        assert!(is_text_file("src/taskpane.html"));
        assert!(is_text_file("manifest.XML"));
        assert!(is_text_file("package.json"));
        assert!(!is_text_file("assets/icon-32.png"));
        assert!(!is_text_file("no_extension"));
    }

    #[tokio::test]
    async fn test_copy_template_substitutes_and_copies() {
        let tmp = tempfile::tempdir().unwrap();
        let store_dir = tmp.path().join("templates");
        let template = store_dir.join("basic");
        std::fs::create_dir_all(template.join("src")).unwrap();
        std::fs::write(store_dir.join("template.yaml"), "templates:\n  - basic\n").unwrap();
        std::fs::write(
            template.join("template.yaml"),
            "name: Basic\ndescription: d\nversion: 0.1.0\nfiles:\n  - package.json\n  - src/logo.png\n",
        )
        .unwrap();
        std::fs::write(
            template.join("package.json"),
            "{ \"name\": \"{{projectName}}\" }",
        )
        .unwrap();
        std::fs::write(template.join("src/logo.png"), [0x89u8, 0x50, 0x4e, 0x47]).unwrap();

        let store = TemplateStore::open(store_dir).unwrap();
        let manifest = store.template_manifest("basic").unwrap();
        let target = tmp.path().join("out");

        let copied = copy_template(&store, "basic", &manifest, &target, &answers())
            .await
            .unwrap();

        assert_eq!(copied, vec!["package.json", "src/logo.png"]);
        let json = std::fs::read_to_string(target.join("package.json")).unwrap();
        assert!(json.contains("My Project"));
        let png = std::fs::read(target.join("src/logo.png")).unwrap();
        assert_eq!(png, vec![0x89u8, 0x50, 0x4e, 0x47]);
    }
}
