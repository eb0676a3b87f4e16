//! Manifest serializer: document tree back to XML text.
//!
//! Output policy: two-space indentation, one element per line; elements
//! whose children include text render inline; empty elements self-close.
//! Attributes render in recorded insertion order with entity escaping.
//! Given the same tree the output is byte-for-byte identical.

use crate::manifest::error::{ManifestError, ManifestResult};
use crate::manifest::model::{Content, Document, Element};
use crate::manifest::parser::{is_name_char, is_name_start};

const INDENT: &str = "  ";

/// Render a document to XML text (UTF-8, `\n` line endings, trailing
/// newline).
pub fn serialize(doc: &Document) -> ManifestResult<String> {
    let mut out = String::new();
    if let Some(declaration) = &doc.declaration {
        out.push_str(declaration);
        out.push('\n');
    }
    write_element(&doc.root, 0, &mut out)?;
    out.push('\n');
    Ok(out)
}

fn write_element(element: &Element, depth: usize, out: &mut String) -> ManifestResult<()> {
    check_name(&element.name)?;

    out.push('<');
    out.push_str(&element.name);

    for (key, value) in &element.attributes {
        check_name(key)?;
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str("/>");
        return Ok(());
    }

    out.push('>');

    let has_text = element
        .children
        .iter()
        .any(|c| matches!(c, Content::Text(_)));

    if has_text {
        // Mixed or text content renders inline so no whitespace is
        // introduced into the text.
        for child in &element.children {
            match child {
                Content::Element(e) => write_element(e, depth + 1, out)?,
                Content::Text(text) => out.push_str(&escape(text)),
                Content::Comment(comment) => {
                    out.push_str("<!--");
                    out.push_str(comment);
                    out.push_str("-->");
                }
            }
        }
    } else {
        for child in &element.children {
            out.push('\n');
            out.push_str(&INDENT.repeat(depth + 1));
            match child {
                Content::Element(e) => write_element(e, depth + 1, out)?,
                Content::Comment(comment) => {
                    out.push_str("<!--");
                    out.push_str(comment);
                    out.push_str("-->");
                }
                // No text children in this branch.
                Content::Text(_) => {}
            }
        }
        out.push('\n');
        out.push_str(&INDENT.repeat(depth));
    }

    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
    Ok(())
}

/// Reject names that cannot be re-parsed. Only reachable through
/// programmatically built trees; a successful parse never produces one.
fn check_name(name: &str) -> ManifestResult<()> {
    let bytes = name.as_bytes();
    let valid = match bytes.first() {
        Some(&first) => {
            is_name_start(first) && bytes.iter().skip(1).all(|&b| is_name_char(b))
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ManifestError::Serialization(format!(
            "invalid XML name: {name:?}"
        )))
    }
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::parser::parse;

    #[test]
    fn test_serialize_empty_element_self_closes() {
        let doc = parse("<App></App>").unwrap();
        assert_eq!(serialize(&doc).unwrap(), "<App/>\n");
    }

    #[test]
    fn test_serialize_text_inline() {
        let doc = parse("<App><Id>abc</Id></App>").unwrap();
        assert_eq!(serialize(&doc).unwrap(), "<App>\n  <Id>abc</Id>\n</App>\n");
    }

    #[test]
    fn test_serialize_attribute_order() {
        let doc = parse("<App xmlns=\"urn:a\" Id=\"x\"/>").unwrap();
        assert_eq!(serialize(&doc).unwrap(), "<App xmlns=\"urn:a\" Id=\"x\"/>\n");
    }

    #[test]
    fn test_serialize_escapes_values() {
        let mut root = Element::new("App");
        root.set_attribute("Name", "R&D \"labs\"");
        let doc = Document {
            declaration: None,
            root,
        };
        assert_eq!(
            serialize(&doc).unwrap(),
            "<App Name=\"R&amp;D &quot;labs&quot;\"/>\n"
        );
    }

    #[test]
    fn test_serialize_declaration_and_comment() {
        let input = "<?xml version=\"1.0\"?>\n<App><!-- note --><Hosts/></App>";
        let doc = parse(input).unwrap();
        let out = serialize(&doc).unwrap();
        assert!(out.starts_with("<?xml version=\"1.0\"?>\n"));
        assert!(out.contains("<!-- note -->"));
    }

    #[test]
    fn test_serialize_rejects_invalid_name() {
        let doc = Document {
            declaration: None,
            root: Element::new("bad name"),
        };
        let err = serialize(&doc).unwrap_err();
        assert!(matches!(err, ManifestError::Serialization(_)));
    }

    #[test]
    fn test_serialize_deterministic() {
        let doc = parse("<App><Hosts><Host Name=\"Mail\"/></Hosts></App>").unwrap();
        assert_eq!(serialize(&doc).unwrap(), serialize(&doc).unwrap());
    }
}
