//! Error types for lintstack operations.
//!
//! This module defines [`LintstackError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration errors (unknown layer, unrecognized file extension,
//!   malformed fragment, broken presets) abort the composition that hit them
//!   and are never defaulted away. [`LintstackError::is_configuration_error`]
//!   groups them.
//! - Parse failures inside the analysis engine are *not* errors: they come
//!   back as a fatal [`Diagnostic`](crate::harness::Diagnostic) so one bad
//!   snippet never aborts a batch.
//! - `anyhow::Error` (via `LintstackError::Other`) covers the unexpected.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for lintstack operations.
#[derive(Debug, Error)]
pub enum LintstackError {
    /// Requested layer name is not one of the built-in layers.
    #[error("Unknown layer: {name} (expected one of: base, functional, functional-library)")]
    UnknownLayer { name: String },

    /// File extension has no parser the analysis engine can select.
    #[error("Unrecognized file extension for '{filename}'")]
    UnrecognizedExtension { filename: String },

    /// A fragment carries a value that does not fit the fragment model.
    #[error("Malformed fragment '{fragment}': {message}")]
    MalformedFragment { fragment: String, message: String },

    /// `compose` was handed no fragments.
    #[error("Cannot compose an empty fragment sequence")]
    EmptyComposition,

    /// Layer `extends` chain loops back on itself.
    #[error("Circular layer extends detected: {cycle}")]
    CircularExtends { cycle: String },

    /// An embedded preset file is missing.
    #[error("Preset not found: {path}")]
    PresetNotFound { path: PathBuf },

    /// An embedded preset file could not be parsed.
    #[error("Failed to parse preset at {path}: {message}")]
    PresetParseError { path: PathBuf, message: String },

    /// Failed to parse a project configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The analysis engine could not run at all.
    #[error("Analysis engine '{command}' failed: {message}")]
    EngineFailed { command: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LintstackError {
    /// Whether this error belongs to the configuration-error kind.
    ///
    /// Configuration errors are unrecoverable for the configuration being
    /// built and must be surfaced to the caller as-is.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownLayer { .. }
                | Self::UnrecognizedExtension { .. }
                | Self::MalformedFragment { .. }
                | Self::EmptyComposition
                | Self::CircularExtends { .. }
                | Self::PresetNotFound { .. }
                | Self::PresetParseError { .. }
                | Self::ConfigParseError { .. }
        )
    }
}

/// Result type alias for lintstack operations.
pub type Result<T> = std::result::Result<T, LintstackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_layer_displays_name() {
        let err = LintstackError::UnknownLayer {
            name: "nonexistent".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("nonexistent"));
        assert!(msg.contains("functional-library"));
    }

    #[test]
    fn unrecognized_extension_displays_filename() {
        let err = LintstackError::UnrecognizedExtension {
            filename: "notes.txt".into(),
        };
        assert!(err.to_string().contains("notes.txt"));
    }

    #[test]
    fn malformed_fragment_displays_fragment_and_message() {
        let err = LintstackError::MalformedFragment {
            fragment: "import-sort".into(),
            message: "bad rule value".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("import-sort"));
        assert!(msg.contains("bad rule value"));
    }

    #[test]
    fn circular_extends_displays_cycle() {
        let err = LintstackError::CircularExtends {
            cycle: "base → functional → base".into(),
        };
        assert!(err.to_string().contains("base → functional → base"));
    }

    #[test]
    fn engine_failed_displays_command() {
        let err = LintstackError::EngineFailed {
            command: "npx eslint".into(),
            message: "exit code 2".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("npx eslint"));
        assert!(msg.contains("exit code 2"));
    }

    #[test]
    fn configuration_errors_are_grouped() {
        assert!(LintstackError::UnknownLayer { name: "x".into() }.is_configuration_error());
        assert!(LintstackError::EmptyComposition.is_configuration_error());
        assert!(LintstackError::UnrecognizedExtension {
            filename: "a.txt".into()
        }
        .is_configuration_error());
        assert!(!LintstackError::EngineFailed {
            command: "eslint".into(),
            message: "crashed".into(),
        }
        .is_configuration_error());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: LintstackError = io_err.into();
        assert!(matches!(err, LintstackError::Io(_)));
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(LintstackError::EmptyComposition)
        }
        assert!(returns_error().is_err());
    }
}
