//! JSON output formatter.

use std::io::Write;

use serde::Serialize;

use super::ConformanceFormatter;
use crate::conformance::{ConformanceDiagnostic, Severity};

/// Formats conformance findings as JSON.
#[derive(Default)]
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    diagnostics: &'a [ConformanceDiagnostic],
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    errors: usize,
    warnings: usize,
    hints: usize,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl ConformanceFormatter for JsonFormatter {
    fn format<W: Write>(
        &self,
        diagnostics: &[ConformanceDiagnostic],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let count = |severity| diagnostics.iter().filter(|d| d.severity == severity).count();
        let output = JsonOutput {
            diagnostics,
            summary: JsonSummary {
                total: diagnostics.len(),
                errors: count(Severity::Error),
                warnings: count(Severity::Warning),
                hints: count(Severity::Hint),
            },
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layer;
    use crate::conformance::CheckId;

    #[test]
    fn formats_valid_json_with_summary() {
        let diagnostics = vec![
            ConformanceDiagnostic::new(
                CheckId::new("plugin-conflict"),
                Severity::Warning,
                "Plugin 'prettier' registered with two handles",
            )
            .with_layer(Layer::Base),
            ConformanceDiagnostic::new(
                CheckId::new("type-aware-allow-list"),
                Severity::Error,
                "missing",
            ),
        ];

        let mut output = Vec::new();
        JsonFormatter::new().format(&diagnostics, &mut output).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(json["summary"]["total"], 2);
        assert_eq!(json["summary"]["errors"], 1);
        assert_eq!(json["summary"]["warnings"], 1);
        assert_eq!(json["diagnostics"][0]["checkId"], "plugin-conflict");
        assert_eq!(json["diagnostics"][0]["layer"], "base");
        assert_eq!(json["diagnostics"][0]["severity"], "warning");
    }

    #[test]
    fn empty_output() {
        let mut output = Vec::new();
        JsonFormatter::new().format(&[], &mut output).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["summary"]["total"], 0);
        assert!(json["diagnostics"].as_array().unwrap().is_empty());
    }
}
