//! In-memory document tree for add-in manifests.
//!
//! The tree is an exact structural mirror of the parsed XML: attribute
//! insertion order, element order, text, and comments are all preserved so
//! that an unmodified tree serializes back to a semantically equivalent
//! document. Each transform invocation owns its tree exclusively.

use indexmap::IndexMap;

/// A parsed manifest document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    /// The raw `<?xml ...?>` declaration, verbatim, if the input had one.
    pub declaration: Option<String>,
    pub root: Element,
}

/// One element node: tag name, ordered attributes, ordered children.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Content>,
}

/// Content appearing inside an element.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Read an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute value. An existing key keeps its position in the
    /// attribute order; a new key appends at the end.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Concatenated text content of this element's direct text children.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            if let Content::Text(text) = child {
                out.push_str(text);
            }
        }
        out
    }

    /// Replace the element's text content with a single text node.
    ///
    /// Element and comment children are left in place; the new text node
    /// takes the position of the first existing text node, or appends if
    /// the element had none.
    pub fn set_text(&mut self, value: impl Into<String>) {
        let first_text = self
            .children
            .iter()
            .position(|c| matches!(c, Content::Text(_)));
        self.children.retain(|c| !matches!(c, Content::Text(_)));
        let at = first_text.unwrap_or(self.children.len());
        self.children.insert(at, Content::Text(value.into()));
    }

    /// Find the `index`-th child element with the given tag name.
    pub fn child(&self, tag: &str, index: usize) -> Option<&Element> {
        self.children
            .iter()
            .filter_map(|c| match c {
                Content::Element(e) if e.name == tag => Some(e),
                _ => None,
            })
            .nth(index)
    }

    /// Mutable variant of [`Element::child`].
    pub fn child_mut(&mut self, tag: &str, index: usize) -> Option<&mut Element> {
        self.children
            .iter_mut()
            .filter_map(|c| match c {
                Content::Element(e) if e.name == tag => Some(e),
                _ => None,
            })
            .nth(index)
    }

    /// Iterate over child elements with the given tag name.
    pub fn child_elements<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter_map(move |c| match c {
            Content::Element(e) if e.name == tag => Some(e),
            _ => None,
        })
    }

    /// Remove every child element with the given tag name and insert the
    /// replacements, in order, at the position of the first removed child
    /// (or at the end if there were none).
    ///
    /// Children of other tags, text, and comments are untouched.
    pub fn replace_children(&mut self, tag: &str, entries: Vec<Element>) {
        let first = self.children.iter().position(|c| match c {
            Content::Element(e) => e.name == tag,
            _ => false,
        });
        self.children.retain(|c| match c {
            Content::Element(e) => e.name != tag,
            _ => true,
        });
        let at = first.unwrap_or(self.children.len());
        for (offset, entry) in entries.into_iter().enumerate() {
            self.children.insert(at + offset, Content::Element(entry));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        let mut root = Element::new("App");
        root.set_attribute("xmlns", "urn:test");
        root.set_attribute("Id", "old");
        let mut hosts = Element::new("Hosts");
        let mut mail = Element::new("Host");
        mail.set_attribute("Name", "Mail");
        hosts.children.push(Content::Element(mail));
        root.children.push(Content::Element(hosts));
        root
    }

    #[test]
    fn test_set_attribute_preserves_position() {
        let mut root = sample();
        root.set_attribute("Id", "new");
        let keys: Vec<&String> = root.attributes.keys().collect();
        assert_eq!(keys, vec!["xmlns", "Id"]);
        assert_eq!(root.attribute("Id"), Some("new"));
    }

    #[test]
    fn test_set_text_replaces_in_place() {
        let mut id = Element::new("Id");
        id.children.push(Content::Text("old-id".to_string()));
        id.set_text("new-id");
        assert_eq!(id.children.len(), 1);
        assert_eq!(id.text(), "new-id");
    }

    #[test]
    fn test_set_text_on_empty_element() {
        let mut id = Element::new("Id");
        id.set_text("fresh");
        assert_eq!(id.text(), "fresh");
    }

    #[test]
    fn test_child_lookup_by_occurrence() {
        let root = sample();
        let hosts = root.child("Hosts", 0).unwrap();
        assert_eq!(hosts.child("Host", 0).unwrap().attribute("Name"), Some("Mail"));
        assert!(hosts.child("Host", 1).is_none());
    }

    #[test]
    fn test_replace_children_keeps_other_content() {
        let mut hosts = Element::new("Hosts");
        hosts
            .children
            .push(Content::Comment(" supported hosts ".to_string()));
        let mut mail = Element::new("Host");
        mail.set_attribute("Name", "Mail");
        hosts.children.push(Content::Element(mail));

        let mut doc = Element::new("Host");
        doc.set_attribute("Name", "Document");
        hosts.replace_children("Host", vec![doc]);

        assert_eq!(hosts.children.len(), 2);
        assert!(matches!(hosts.children[0], Content::Comment(_)));
        assert_eq!(
            hosts.child("Host", 0).unwrap().attribute("Name"),
            Some("Document")
        );
    }
}
