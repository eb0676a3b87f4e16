//! Field addressing for the document tree.
//!
//! A [`FieldPath`] is a sequence of `(tag, occurrence)` steps walked from
//! the root element, ending in a target slot: an attribute, the element's
//! text content, or a repeated-child collection. Resolution of a missing
//! step yields [`ManifestError::PathNotFound`], which is distinct from a
//! parse failure so callers can treat optional fields as skippable.

use std::fmt;

use crate::manifest::error::{ManifestError, ManifestResult};
use crate::manifest::model::Element;

/// One traversal step: the `index`-th child element named `tag`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub tag: String,
    pub index: usize,
}

/// The slot a path terminates in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// A named attribute on the addressed element.
    Attribute(String),
    /// The text content of the addressed element.
    Text,
    /// All child elements with the given tag under the addressed element.
    Children(String),
}

/// Address of a readable/writable slot in the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldPath {
    steps: Vec<Step>,
    target: Target,
}

impl FieldPath {
    /// Path to an attribute of the element reached via `steps`.
    /// Empty `steps` addresses the root element itself.
    pub fn attribute(steps: &[(&str, usize)], name: &str) -> Self {
        Self {
            steps: Self::to_steps(steps),
            target: Target::Attribute(name.to_string()),
        }
    }

    /// Path to the text content of the element reached via `steps`.
    pub fn text(steps: &[(&str, usize)]) -> Self {
        Self {
            steps: Self::to_steps(steps),
            target: Target::Text,
        }
    }

    /// Path to the `tag`-named child collection of the element reached via
    /// `steps`.
    pub fn children(steps: &[(&str, usize)], tag: &str) -> Self {
        Self {
            steps: Self::to_steps(steps),
            target: Target::Children(tag.to_string()),
        }
    }

    fn to_steps(steps: &[(&str, usize)]) -> Vec<Step> {
        steps
            .iter()
            .map(|(tag, index)| Step {
                tag: (*tag).to_string(),
                index: *index,
            })
            .collect()
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Walk the steps from `root` to the addressed element.
    pub fn resolve_element<'t>(&self, root: &'t Element) -> ManifestResult<&'t Element> {
        let mut current = root;
        for step in &self.steps {
            current = current
                .child(&step.tag, step.index)
                .ok_or_else(|| self.not_found())?;
        }
        Ok(current)
    }

    /// Mutable variant of [`FieldPath::resolve_element`].
    pub fn resolve_element_mut<'t>(&self, root: &'t mut Element) -> ManifestResult<&'t mut Element> {
        let mut current = root;
        for step in &self.steps {
            current = current
                .child_mut(&step.tag, step.index)
                .ok_or_else(|| self.not_found())?;
        }
        Ok(current)
    }

    /// Read the current scalar value at this path, for diagnostics and
    /// tests. Collection targets have no scalar reading.
    pub fn read<'t>(&self, root: &'t Element) -> ManifestResult<Option<String>> {
        let element = self.resolve_element(root)?;
        match &self.target {
            Target::Attribute(name) => Ok(element.attribute(name).map(str::to_string)),
            Target::Text => Ok(Some(element.text())),
            Target::Children(_) => Ok(None),
        }
    }

    /// The error produced when this path fails to resolve.
    pub fn not_found(&self) -> ManifestError {
        ManifestError::PathNotFound {
            path: self.to_string(),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            if step.index == 0 {
                write!(f, "{}", step.tag)?;
            } else {
                write!(f, "{}[{}]", step.tag, step.index)?;
            }
        }
        match &self.target {
            Target::Attribute(name) => write!(f, "@{name}"),
            Target::Text => f.write_str("/text()"),
            Target::Children(tag) => {
                if self.steps.is_empty() {
                    write!(f, "{tag}")
                } else {
                    write!(f, "/{tag}")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::parser::parse;

    const MANIFEST: &str = "<App Id=\"root-id\">\
        <DisplayName DefaultValue=\"Demo\"/>\
        <Hosts><Host Name=\"Mail\"/></Hosts>\
        </App>";

    #[test]
    fn test_resolve_root_attribute() {
        let doc = parse(MANIFEST).unwrap();
        let path = FieldPath::attribute(&[], "Id");
        assert_eq!(path.read(&doc.root).unwrap().as_deref(), Some("root-id"));
    }

    #[test]
    fn test_resolve_nested_attribute() {
        let doc = parse(MANIFEST).unwrap();
        let path = FieldPath::attribute(&[("DisplayName", 0)], "DefaultValue");
        assert_eq!(path.read(&doc.root).unwrap().as_deref(), Some("Demo"));
    }

    #[test]
    fn test_resolve_missing_step_is_path_not_found() {
        let doc = parse(MANIFEST).unwrap();
        let path = FieldPath::attribute(&[("Requirements", 0)], "Version");
        let err = path.read(&doc.root).unwrap_err();
        assert!(matches!(err, ManifestError::PathNotFound { .. }));
    }

    #[test]
    fn test_resolve_occurrence_index() {
        let doc = parse("<App><Set v=\"a\"/><Set v=\"b\"/></App>").unwrap();
        let second = FieldPath::attribute(&[("Set", 1)], "v");
        assert_eq!(second.read(&doc.root).unwrap().as_deref(), Some("b"));
        let third = FieldPath::attribute(&[("Set", 2)], "v");
        assert!(third.read(&doc.root).is_err());
    }

    #[test]
    fn test_display_names_the_full_path() {
        let path = FieldPath::attribute(&[("DisplayName", 0)], "DefaultValue");
        assert_eq!(path.to_string(), "DisplayName@DefaultValue");

        let hosts = FieldPath::children(&[("Hosts", 0)], "Host");
        assert_eq!(hosts.to_string(), "Hosts/Host");

        let id = FieldPath::text(&[("Id", 0)]);
        assert_eq!(id.to_string(), "Id/text()");
    }
}
