//! Verification reports.
//!
//! Collects per-file results of a verification run and renders them as
//! terminal text or JSON.

use serde::Serialize;

use super::diagnostic::{Diagnostic, DiagnosticSeverity};
use super::verify::SnippetOutcome;
use crate::error::{LintstackError, Result};
use crate::ui::LintstackTheme;

/// Outcome for one verified file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub filename: String,
    pub diagnostics: Vec<Diagnostic>,
    /// Set when the file could not be verified at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The file matched a global ignore pattern.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub ignored: bool,
}

impl FileReport {
    pub fn ignored(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            diagnostics: Vec::new(),
            error: None,
            ignored: true,
        }
    }
}

impl From<SnippetOutcome> for FileReport {
    fn from(outcome: SnippetOutcome) -> Self {
        let (diagnostics, error) = match outcome.result {
            Ok(diagnostics) => (diagnostics, None),
            Err(e) => (Vec::new(), Some(e.to_string())),
        };
        Self {
            filename: outcome.filename,
            diagnostics,
            error,
            ignored: false,
        }
    }
}

/// Totals over a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
    pub fatal: usize,
    pub failed: usize,
    pub ignored: usize,
}

/// Results of verifying a set of files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VerifyReport {
    pub files: Vec<FileReport>,
    pub summary: ReportSummary,
}

impl VerifyReport {
    pub fn new(files: Vec<FileReport>) -> Self {
        let diagnostics = || files.iter().flat_map(|f| f.diagnostics.iter());
        let summary = ReportSummary {
            files: files.len(),
            errors: diagnostics()
                .filter(|d| d.severity == DiagnosticSeverity::Error)
                .count(),
            warnings: diagnostics()
                .filter(|d| d.severity == DiagnosticSeverity::Warning)
                .count(),
            fatal: diagnostics().filter(|d| d.fatal).count(),
            failed: files.iter().filter(|f| f.error.is_some()).count(),
            ignored: files.iter().filter(|f| f.ignored).count(),
        };
        Self { files, summary }
    }

    /// Whether the run should fail: error diagnostics or unverifiable files.
    pub fn has_errors(&self) -> bool {
        self.summary.errors > 0 || self.summary.failed > 0
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| LintstackError::Other(e.into()))
    }

    /// ESLint-stylish text.
    pub fn to_human(&self, theme: &LintstackTheme) -> String {
        let mut out = String::new();

        for file in &self.files {
            if file.ignored || (file.diagnostics.is_empty() && file.error.is_none()) {
                continue;
            }
            out.push_str(&format!("{}\n", theme.highlight.apply_to(&file.filename)));

            if let Some(error) = &file.error {
                out.push_str(&format!("  {}\n", theme.format_error(error)));
            }
            for diag in &file.diagnostics {
                let position = match (diag.line, diag.column) {
                    (Some(line), Some(column)) => format!("{line}:{column}"),
                    (Some(line), None) => format!("{line}"),
                    _ => "-".to_string(),
                };
                let severity = match diag.severity {
                    DiagnosticSeverity::Error => theme.error.apply_to("error"),
                    DiagnosticSeverity::Warning => theme.warning.apply_to("warning"),
                };
                let rule = diag.rule_id().unwrap_or(if diag.fatal { "fatal" } else { "" });
                out.push_str(&format!(
                    "  {:<7} {:<7}  {}  {}\n",
                    theme.dim.apply_to(position),
                    severity,
                    diag.message,
                    theme.dim.apply_to(rule)
                ));
            }
            out.push('\n');
        }

        let s = &self.summary;
        let problems = s.errors + s.warnings;
        let line = format!(
            "{} problem{} ({} error{}, {} warning{}) in {} file{}",
            problems,
            plural(problems),
            s.errors,
            plural(s.errors),
            s.warnings,
            plural(s.warnings),
            s.files,
            plural(s.files)
        );
        out.push_str(&if self.has_errors() {
            theme.format_error(&line)
        } else if problems > 0 {
            theme.format_warning(&line)
        } else {
            theme.format_success(&line)
        });
        out.push('\n');
        out
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
