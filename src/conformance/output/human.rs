//! Human-readable output formatter.

use std::io::Write;

use console::Style;

use super::ConformanceFormatter;
use crate::conformance::{ConformanceDiagnostic, Severity};

/// Formats conformance findings for terminal display.
pub struct HumanFormatter {
    pub use_color: bool,
}

impl HumanFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn severity_label(&self, severity: Severity) -> String {
        let (label, style) = match severity {
            Severity::Hint => ("hint", Style::new().cyan()),
            Severity::Warning => ("warning", Style::new().yellow()),
            Severity::Error => ("error", Style::new().red().bold()),
        };
        if self.use_color {
            style.apply_to(label).to_string()
        } else {
            label.to_string()
        }
    }
}

impl ConformanceFormatter for HumanFormatter {
    fn format<W: Write>(
        &self,
        diagnostics: &[ConformanceDiagnostic],
        writer: &mut W,
    ) -> std::io::Result<()> {
        for diag in diagnostics {
            writeln!(
                writer,
                "{}[{}]: {}",
                self.severity_label(diag.severity),
                diag.check_id,
                diag.message
            )?;

            match (&diag.layer, &diag.fragment) {
                (Some(layer), Some(fragment)) => {
                    writeln!(writer, "  --> layer {layer}, fragment {fragment}")?
                }
                (Some(layer), None) => writeln!(writer, "  --> layer {layer}")?,
                (None, Some(fragment)) => writeln!(writer, "  --> fragment {fragment}")?,
                (None, None) => {}
            }

            if let Some(ref suggestion) = diag.suggestion {
                writeln!(writer, "   = help: {}", suggestion)?;
            }

            writeln!(writer)?;
        }

        let count = |severity| diagnostics.iter().filter(|d| d.severity == severity).count();
        let (errors, warnings) = (count(Severity::Error), count(Severity::Warning));

        if errors > 0 || warnings > 0 {
            writeln!(
                writer,
                "Found {} error(s) and {} warning(s)",
                errors, warnings
            )?;
        } else {
            writeln!(writer, "All layers conform")?;
        }

        Ok(())
    }
}
