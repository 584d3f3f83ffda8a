//! Conformance output formatters.

pub mod human;
pub mod json;

use std::io::Write;

use super::ConformanceDiagnostic;

/// Output format for conformance results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Trait for formatting conformance output.
pub trait ConformanceFormatter {
    fn format<W: Write>(
        &self,
        diagnostics: &[ConformanceDiagnostic],
        writer: &mut W,
    ) -> std::io::Result<()>;
}

pub use human::HumanFormatter;
pub use json::JsonFormatter;
