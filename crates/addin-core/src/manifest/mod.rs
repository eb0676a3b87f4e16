//! Manifest transformation pipeline.
//!
//! This module provides:
//! - A document tree preserving attribute order, unknown elements, and
//!   comments (round-trip fidelity)
//! - An XML parser with positional diagnostics
//! - Field addressing for scalar and collection slots
//! - Ordered mutation directives and the transform pipeline
//! - A deterministic serializer
//!
//! The whole pipeline is a pure, blocking, in-memory computation; each
//! invocation owns its tree exclusively.

pub mod cursor;
pub mod error;
pub mod model;
pub mod parser;
pub mod path;
pub mod serializer;
pub mod transform;

pub use error::{ManifestError, ManifestResult};
pub use model::{Content, Document, Element};
pub use parser::parse;
pub use path::{FieldPath, Target};
pub use serializer::serialize;
pub use transform::{
    apply, host_entries, manifest_directives, transform, Directive, MissingField,
};
