//! The immutable answers record produced by the prompt flow.
//!
//! Constructed once, after all prompts have resolved, and passed by value
//! into the directive-building and materialization steps. Nothing mutates
//! it afterwards.

use std::fmt;
use std::path::PathBuf;

use uuid::Uuid;

/// Host applications an add-in can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Host {
    Document,
    Workbook,
    Presentation,
    Project,
    Mail,
    Notebook,
}

/// Every selectable host, in the order prompts present them.
pub const ALL_HOSTS: [Host; 6] = [
    Host::Document,
    Host::Workbook,
    Host::Presentation,
    Host::Project,
    Host::Mail,
    Host::Notebook,
];

impl Host {
    /// The identifier written into manifest `Host` entries.
    pub fn name(&self) -> &'static str {
        match self {
            Host::Document => "Document",
            Host::Workbook => "Workbook",
            Host::Presentation => "Presentation",
            Host::Project => "Project",
            Host::Mail => "Mail",
            Host::Notebook => "Notebook",
        }
    }

    /// Parse a host name as given on the command line.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "document" | "doc" => Some(Host::Document),
            "workbook" | "book" => Some(Host::Workbook),
            "presentation" | "slides" => Some(Host::Presentation),
            "project" | "plan" => Some(Host::Project),
            "mail" | "mailbox" => Some(Host::Mail),
            "notebook" | "notes" => Some(Host::Notebook),
            _ => None,
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Answers collected for one scaffolding run.
#[derive(Debug, Clone)]
pub struct ProjectAnswers {
    /// Project display name (free text).
    pub name: String,
    /// Generated unique project identifier.
    pub id: String,
    /// Selected hosts, ordered, duplicate-free. May be empty when the
    /// template does not declare a host section.
    pub hosts: Vec<Host>,
    /// Name of the selected template.
    pub template: String,
    /// Destination directory for the scaffolded project.
    pub directory: PathBuf,
}

impl ProjectAnswers {
    /// Assemble the record, generating a fresh project id.
    pub fn new(
        name: impl Into<String>,
        hosts: Vec<Host>,
        template: impl Into<String>,
        directory: PathBuf,
    ) -> Self {
        Self {
            name: name.into(),
            id: Uuid::new_v4().to_string(),
            hosts,
            template: template.into(),
            directory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_parse_is_lenient() {
        assert_eq!(Host::parse("Mail"), Some(Host::Mail));
        assert_eq!(Host::parse("mailbox"), Some(Host::Mail));
        assert_eq!(Host::parse("DOC"), Some(Host::Document));
        assert_eq!(Host::parse("spreadsheet"), None);
    }

    #[test]
    fn test_host_display_matches_manifest_name() {
        assert_eq!(Host::Workbook.to_string(), "Workbook");
        assert_eq!(Host::Notebook.name(), "Notebook");
    }

    #[test]
    fn test_answers_generate_unique_ids() {
        let a = ProjectAnswers::new("A", vec![], "taskpane", PathBuf::from("/tmp/a"));
        let b = ProjectAnswers::new("B", vec![], "taskpane", PathBuf::from("/tmp/b"));
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, "A");
    }
}
