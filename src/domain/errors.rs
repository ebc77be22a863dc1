//! Domain error types
//!
//! This module defines the error hierarchy for Strata. Setup failures abort a
//! run before any layer is written; per-layer failures are recorded in the
//! export result and never stop the loop.

use std::path::PathBuf;
use thiserror::Error;

/// Main Strata error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum StrataError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Layer manifest could not be read or parsed
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Errors raised by the host document
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// The document offers no way to capture and restore its state
    #[error("Snapshot unavailable: {0}")]
    SnapshotUnavailable(String),

    /// A visibility guard operation was invoked in the wrong state
    #[error("Invalid visibility guard state: cannot {operation} while {state}")]
    InvalidGuardState {
        operation: &'static str,
        state: &'static str,
    },

    /// Nothing in the document (or in the requested subset) can be exported
    #[error("No exportable layers: {0}")]
    NoExportableLayers(String),

    /// Every candidate file name for a layer is already taken
    #[error("Exhausted file name space for {} after {attempts} attempts", base.display())]
    ExhaustedNameSpace { base: PathBuf, attempts: usize },

    /// The renderer failed to write a layer
    #[error("Render error: {0}")]
    Render(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised by a layered document
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// No node exists at the given path
    #[error("Layer not found at {0}")]
    LayerNotFound(String),

    /// The node exists but its visibility cannot be changed
    #[error("Visibility of '{0}' is locked")]
    VisibilityLocked(String),

    /// The history marker does not belong to this document's history
    #[error("Unknown history marker: generation {0}")]
    UnknownHistoryMarker(u64),
}

// Conversion from std::io::Error
impl From<std::io::Error> for StrataError {
    fn from(err: std::io::Error) -> Self {
        StrataError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for StrataError {
    fn from(err: serde_json::Error) -> Self {
        StrataError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for StrataError {
    fn from(err: toml::de::Error) -> Self {
        StrataError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strata_error_display() {
        let err = StrataError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_document_error_conversion() {
        let doc_err = DocumentError::LayerNotFound("0/3".to_string());
        let err: StrataError = doc_err.into();
        assert!(matches!(err, StrataError::Document(_)));
        assert_eq!(err.to_string(), "Document error: Layer not found at 0/3");
    }

    #[test]
    fn test_exhausted_name_space_display() {
        let err = StrataError::ExhaustedNameSpace {
            base: PathBuf::from("/out/Sky"),
            attempts: 100,
        };
        assert_eq!(
            err.to_string(),
            "Exhausted file name space for /out/Sky after 100 attempts"
        );
    }

    #[test]
    fn test_guard_state_display() {
        let err = StrataError::InvalidGuardState {
            operation: "isolate",
            state: "idle",
        };
        assert!(err.to_string().contains("cannot isolate while idle"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: StrataError = io_err.into();
        assert!(matches!(err, StrataError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: StrataError = json_err.into();
        assert!(matches!(err, StrataError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: StrataError = toml_err.into();
        assert!(matches!(err, StrataError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_strata_error_implements_std_error() {
        let err = StrataError::Render("encoder crashed".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
