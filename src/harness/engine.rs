//! The analysis engine boundary.

use std::fmt;
use std::path::Path;

use super::diagnostic::Diagnostic;
use crate::config::EffectiveConfig;
use crate::error::{LintstackError, Result};

/// Something that can run a composed configuration over source text.
///
/// Implementations must not fail on unparsable source: a parse failure is
/// reported as a single fatal [`Diagnostic`]. `Err` is reserved for an
/// engine that could not run at all.
pub trait AnalysisEngine: Send + Sync {
    /// Short name for logs and messages.
    fn name(&self) -> &str;

    /// Analyze `source` as if it were the file `filename`.
    ///
    /// Diagnostics come back in the engine's order.
    fn analyze(
        &self,
        source: &str,
        config: &EffectiveConfig,
        filename: &str,
    ) -> Result<Vec<Diagnostic>>;
}

/// Parser selection derived from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    TypeScript,
    TypeScriptJsx,
    JavaScript,
    JavaScriptJsx,
}

impl SourceKind {
    /// Extensions the engine knows how to parse.
    pub const EXTENSIONS: &'static [&'static str] =
        &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

    /// Select the parser for `filename`.
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        match extension {
            "ts" | "mts" | "cts" => Ok(SourceKind::TypeScript),
            "tsx" => Ok(SourceKind::TypeScriptJsx),
            "js" | "mjs" | "cjs" => Ok(SourceKind::JavaScript),
            "jsx" => Ok(SourceKind::JavaScriptJsx),
            _ => Err(LintstackError::UnrecognizedExtension {
                filename: filename.to_string(),
            }),
        }
    }

    pub fn is_typescript(self) -> bool {
        matches!(self, SourceKind::TypeScript | SourceKind::TypeScriptJsx)
    }

    pub fn is_jsx(self) -> bool {
        matches!(self, SourceKind::TypeScriptJsx | SourceKind::JavaScriptJsx)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::TypeScript => "typescript",
            SourceKind::TypeScriptJsx => "typescript-jsx",
            SourceKind::JavaScript => "javascript",
            SourceKind::JavaScriptJsx => "javascript-jsx",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_parser_by_extension() {
        assert_eq!(
            SourceKind::from_filename("test.ts").unwrap(),
            SourceKind::TypeScript
        );
        assert_eq!(
            SourceKind::from_filename("src/App.tsx").unwrap(),
            SourceKind::TypeScriptJsx
        );
        assert_eq!(
            SourceKind::from_filename("eslint.config.mjs").unwrap(),
            SourceKind::JavaScript
        );
        assert!(SourceKind::from_filename("index.cts").unwrap().is_typescript());
        assert!(SourceKind::from_filename("a.jsx").unwrap().is_jsx());
    }

    #[test]
    fn every_listed_extension_is_accepted() {
        for ext in SourceKind::EXTENSIONS {
            assert!(SourceKind::from_filename(&format!("file.{ext}")).is_ok());
        }
    }

    #[test]
    fn rejects_unknown_or_missing_extension() {
        for name in ["notes.txt", "Makefile", "archive.ts.bak", ".ts"] {
            let err = SourceKind::from_filename(name).unwrap_err();
            assert!(
                matches!(err, LintstackError::UnrecognizedExtension { .. }),
                "{name} should be rejected"
            );
        }
    }
}
