//! Error types for the manifest transformation pipeline.

use thiserror::Error;

/// Result type alias for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Errors surfaced by the parse -> resolve -> mutate -> serialize pipeline.
///
/// All variants propagate synchronously to the immediate caller; the core
/// performs no logging, no retries, and never writes a partial document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    /// The input text is not well-formed XML. Fatal for the whole
    /// generation step.
    #[error("malformed manifest at line {line}, column {col}: {message}")]
    Malformed {
        line: u32,
        col: u32,
        message: String,
    },

    /// A field address did not resolve against the document tree. Fatal for
    /// mandatory fields; callers may treat it as a skip for optional ones.
    #[error("manifest path not found: {path}")]
    PathNotFound { path: String },

    /// Internal tree-invariant violation during rendering. Not expected for
    /// trees that originate from a successful parse.
    #[error("manifest serialization failed: {0}")]
    Serialization(String),
}

impl ManifestError {
    /// Create a parse error at a source position.
    pub fn malformed(line: u32, col: u32, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            col,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display_includes_position() {
        let err = ManifestError::malformed(3, 14, "unexpected token");
        let display = err.to_string();
        assert!(display.contains("line 3"));
        assert!(display.contains("column 14"));
        assert!(display.contains("unexpected token"));
    }

    #[test]
    fn test_path_not_found_display() {
        let err = ManifestError::PathNotFound {
            path: "Hosts/Host@Name".to_string(),
        };
        assert!(err.to_string().contains("Hosts/Host@Name"));
    }
}
