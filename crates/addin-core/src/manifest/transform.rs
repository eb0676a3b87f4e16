//! Mutation directives and the parse -> mutate -> serialize pipeline.
//!
//! Directives execute strictly in the order supplied; later directives see
//! the effect of earlier ones. Given the same input text and directive
//! sequence the output is byte-for-byte identical.

use crate::answers::ProjectAnswers;
use crate::manifest::error::ManifestResult;
use crate::manifest::model::Element;
use crate::manifest::path::{FieldPath, Target};
use crate::manifest::{parser, serializer};

/// What to do when a directive's path does not resolve.
///
/// Mandatory fields (project id, display name) fail the whole transform;
/// optional fields present only in some manifest variants are skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingField {
    Fail,
    Skip,
}

/// One caller-specified mutation to apply to the tree.
#[derive(Clone, Debug)]
pub enum Directive {
    /// Overwrite the scalar slot (attribute or text) the path addresses.
    SetScalar {
        path: FieldPath,
        value: String,
        on_missing: MissingField,
    },
    /// Replace the addressed collection's entire child set of the path's
    /// target tag with `entries`, in the order supplied.
    ReplaceChildren {
        path: FieldPath,
        entries: Vec<Element>,
        on_missing: MissingField,
    },
}

/// Apply directives to a parsed tree, in order.
pub fn apply(root: &mut Element, directives: &[Directive]) -> ManifestResult<()> {
    for directive in directives {
        match directive {
            Directive::SetScalar {
                path,
                value,
                on_missing,
            } => {
                let element = match path.resolve_element_mut(root) {
                    Ok(element) => element,
                    Err(_) if *on_missing == MissingField::Skip => continue,
                    Err(err) => return Err(err),
                };
                match path.target() {
                    Target::Attribute(name) => element.set_attribute(name.clone(), value.clone()),
                    Target::Text => element.set_text(value.clone()),
                    // A scalar directive never carries a collection path.
                    Target::Children(_) => return Err(path.not_found()),
                }
            }
            Directive::ReplaceChildren {
                path,
                entries,
                on_missing,
            } => {
                let element = match path.resolve_element_mut(root) {
                    Ok(element) => element,
                    Err(_) if *on_missing == MissingField::Skip => continue,
                    Err(err) => return Err(err),
                };
                match path.target() {
                    Target::Children(tag) => element.replace_children(tag, entries.clone()),
                    _ => return Err(path.not_found()),
                }
            }
        }
    }
    Ok(())
}

/// Run the full pipeline over manifest text.
pub fn transform(input: &str, directives: &[Directive]) -> ManifestResult<String> {
    let mut doc = parser::parse(input)?;
    apply(&mut doc.root, directives)?;
    serializer::serialize(&doc)
}

/// Build one collection entry per host identifier: `<{tag} Name="..."/>`,
/// in input order, no other attributes.
pub fn host_entries<'a>(tag: &str, names: impl IntoIterator<Item = &'a str>) -> Vec<Element> {
    names
        .into_iter()
        .map(|name| {
            let mut entry = Element::new(tag);
            entry.set_attribute("Name", name);
            entry
        })
        .collect()
}

/// The fixed directive sequence derived from one answers record:
/// project id into the root `<Id>`, display name into
/// `DisplayName/@DefaultValue`, and (when hosts were selected) a full
/// rebuild of the `Hosts` collection.
pub fn manifest_directives(answers: &ProjectAnswers) -> Vec<Directive> {
    let mut directives = vec![
        Directive::SetScalar {
            path: FieldPath::text(&[("Id", 0)]),
            value: answers.id.clone(),
            on_missing: MissingField::Fail,
        },
        Directive::SetScalar {
            path: FieldPath::attribute(&[("DisplayName", 0)], "DefaultValue"),
            value: answers.name.clone(),
            on_missing: MissingField::Fail,
        },
    ];

    if !answers.hosts.is_empty() {
        directives.push(Directive::ReplaceChildren {
            path: FieldPath::children(&[("Hosts", 0)], "Host"),
            entries: host_entries("Host", answers.hosts.iter().map(|h| h.name())),
            on_missing: MissingField::Skip,
        });
    }

    directives
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::error::ManifestError;

    const BASE: &str = "<App>\
        <Id>OLD-ID</Id>\
        <DisplayName DefaultValue=\"Old Name\"/>\
        <Hosts><Host Name=\"Mail\"/></Hosts>\
        </App>";

    fn set_id(value: &str) -> Directive {
        Directive::SetScalar {
            path: FieldPath::text(&[("Id", 0)]),
            value: value.to_string(),
            on_missing: MissingField::Fail,
        }
    }

    fn replace_hosts(names: &[&str]) -> Directive {
        Directive::ReplaceChildren {
            path: FieldPath::children(&[("Hosts", 0)], "Host"),
            entries: host_entries("Host", names.iter().copied()),
            on_missing: MissingField::Skip,
        }
    }

    fn host_names(output: &str) -> Vec<String> {
        let doc = parser::parse(output).unwrap();
        let hosts = doc.root.child("Hosts", 0).unwrap();
        hosts
            .child_elements("Host")
            .map(|h| h.attribute("Name").unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_scalar_mutation_is_idempotent() {
        let once = transform(BASE, &[set_id("abc-123")]).unwrap();
        let twice = transform(BASE, &[set_id("abc-123"), set_id("abc-123")]).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_later_directives_see_earlier_effects() {
        let output = transform(BASE, &[set_id("first"), set_id("second")]).unwrap();
        let doc = parser::parse(&output).unwrap();
        assert_eq!(doc.root.child("Id", 0).unwrap().text(), "second");
    }

    #[test]
    fn test_host_replacement_is_total_not_additive() {
        let output = transform(BASE, &[replace_hosts(&["Document", "Workbook"])]).unwrap();
        assert_eq!(host_names(&output), vec!["Document", "Workbook"]);
        assert!(!output.contains("Mail"));
    }

    #[test]
    fn test_host_replacement_preserves_input_order() {
        let forward = transform(BASE, &[replace_hosts(&["Document", "Workbook"])]).unwrap();
        let reverse = transform(BASE, &[replace_hosts(&["Workbook", "Document"])]).unwrap();
        assert_eq!(host_names(&forward), vec!["Document", "Workbook"]);
        assert_eq!(host_names(&reverse), vec!["Workbook", "Document"]);
    }

    #[test]
    fn test_missing_optional_path_is_skipped() {
        let no_hosts = "<App><Id>x</Id><DisplayName DefaultValue=\"n\"/></App>";
        let output = transform(no_hosts, &[replace_hosts(&["Document"])]).unwrap();
        // Rest of the document untouched.
        let doc = parser::parse(&output).unwrap();
        assert_eq!(doc.root.child("Id", 0).unwrap().text(), "x");
        assert!(doc.root.child("Hosts", 0).is_none());
    }

    #[test]
    fn test_missing_mandatory_path_fails() {
        let no_id = "<App><DisplayName DefaultValue=\"n\"/></App>";
        let err = transform(no_id, &[set_id("abc")]).unwrap_err();
        assert!(matches!(err, ManifestError::PathNotFound { .. }));
    }

    #[test]
    fn test_malformed_input_rejected_before_mutation() {
        let err = transform("<App><Id>x</Id>", &[set_id("abc")]).unwrap_err();
        assert!(matches!(err, ManifestError::Malformed { .. }));
    }

    #[test]
    fn test_untouched_siblings_survive_mutation() {
        let input = "<App Version=\"1.1\">\
            <Id>OLD</Id>\
            <Vendor Name=\"Acme\" Region=\"EU\"/>\
            <DisplayName DefaultValue=\"Old\"/>\
            </App>";
        let output = transform(input, &[set_id("new")]).unwrap();
        let doc = parser::parse(&output).unwrap();
        assert_eq!(doc.root.attribute("Version"), Some("1.1"));
        let vendor = doc.root.child("Vendor", 0).unwrap();
        assert_eq!(vendor.attribute("Name"), Some("Acme"));
        assert_eq!(vendor.attribute("Region"), Some("EU"));
        let keys: Vec<&String> = vendor.attributes.keys().collect();
        assert_eq!(keys, vec!["Name", "Region"]);
    }

    #[test]
    fn test_transform_deterministic() {
        let directives = [set_id("abc"), replace_hosts(&["Notebook"])];
        assert_eq!(
            transform(BASE, &directives).unwrap(),
            transform(BASE, &directives).unwrap()
        );
    }
}
