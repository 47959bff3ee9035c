//! Custom error types for trello2md
//!
//! This module defines the error hierarchy for the exporter using thiserror
//! for ergonomic error definitions. Every kind is fatal for the run: nothing
//! is retried and already written documents are left in place.

use std::path::Path;

use thiserror::Error;

/// The main error type for trello2md operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// A reference string could not be sliced into a slug
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// The source could not resolve a reference to an entity
    #[error("{entity_type} not found: {identifier}")]
    SourceLookup {
        entity_type: &'static str,
        identifier: String,
    },

    /// Directory or file creation/write failure
    #[error("Filesystem error: {0}")]
    Filesystem(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Misuse of the exporter (e.g. rendering a board as a card)
    #[error("Export error: {0}")]
    Export(String),
}

impl ExportError {
    /// Create an "invalid reference" error for a reference string
    pub fn invalid_reference(reference: impl Into<String>) -> Self {
        Self::InvalidReference(reference.into())
    }

    /// Create a lookup error for a source document
    pub fn source_not_found(identifier: impl Into<String>) -> Self {
        Self::SourceLookup {
            entity_type: "Source",
            identifier: identifier.into(),
        }
    }

    /// Create a lookup error for a member referenced by a card
    pub fn member_not_found(identifier: impl Into<String>) -> Self {
        Self::SourceLookup {
            entity_type: "Member",
            identifier: identifier.into(),
        }
    }

    /// Wrap an I/O failure with the path it happened on
    pub fn filesystem(action: &str, path: &Path, err: std::io::Error) -> Self {
        Self::Filesystem(format!("Failed to {} {}: {}", action, path.display(), err))
    }

    /// Check if this is an "invalid reference" error
    pub fn is_invalid_reference(&self) -> bool {
        matches!(self, Self::InvalidReference(_))
    }

    /// Check if this is a source lookup error
    pub fn is_source_lookup(&self) -> bool {
        matches!(self, Self::SourceLookup { .. })
    }

    /// Check if this is a filesystem error
    pub fn is_filesystem(&self) -> bool {
        matches!(self, Self::Filesystem(_))
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Filesystem(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for trello2md operations
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExportError::invalid_reference("https://trello.com/");
        assert_eq!(err.to_string(), "Invalid reference: https://trello.com/");
        assert!(err.is_invalid_reference());
    }

    #[test]
    fn test_lookup_error() {
        let err = ExportError::member_not_found("5e1f");
        assert_eq!(err.to_string(), "Member not found: 5e1f");
        assert!(err.is_source_lookup());
    }

    #[test]
    fn test_filesystem_error_names_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ExportError::filesystem("create directory", Path::new("out/board"), io_err);
        assert!(err.is_filesystem());
        assert!(err.to_string().contains("out/board"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExportError = io_err.into();
        assert!(matches!(err, ExportError::Filesystem(_)));
    }
}
