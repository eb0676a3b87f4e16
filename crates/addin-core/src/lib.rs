//! Add-in Core - Library for scaffolding host-application add-in projects
//!
//! This library provides the core functionality for generating add-in
//! projects from templates and patching their XML manifests.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Manifest Pipeline** - Pure parse/mutate/serialize over the
//!   add-in manifest document (`manifest` module)
//! - **Layer 2: Scaffolding Operations** - Template store, copier, runtime
//!   detection, and dependency installation
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use addin_core::answers::{Host, ProjectAnswers};
//! use addin_core::manifest::{manifest_directives, transform};
//!
//! let answers = ProjectAnswers::new(
//!     "My Project",
//!     vec![Host::Document, Host::Workbook],
//!     "taskpane",
//!     "/tmp/my-project".into(),
//! );
//! let patched = transform(&manifest_text, &manifest_directives(&answers))?;
//! ```

pub mod answers;
pub mod manifest;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use answers::{Host, ProjectAnswers, ALL_HOSTS};
pub use manifest::{
    manifest_directives, transform, Directive, ManifestError, ManifestResult, MissingField,
};
pub use templates::{copy_template, RootManifest, TemplateManifest, TemplateStore};

#[cfg(feature = "tui")]
pub use tui::run;

/// CLI version - used for template compatibility checking
/// The binary should define its own version, but this provides a fallback
pub const DEFAULT_CLI_VERSION: &str = "0.2.0";
