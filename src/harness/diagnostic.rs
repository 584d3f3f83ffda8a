//! Diagnostics emitted by the analysis engine.
//!
//! The shape mirrors one entry of ESLint's JSON formatter output, so engine
//! output deserializes straight into [`Diagnostic`]; unknown keys
//! (`nodeType`, `endLine`, `fix`, ...) are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::RuleId;

/// Severity reported on a diagnostic: 1 for warnings, 2 for errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum DiagnosticSeverity {
    Warning,
    Error,
}

impl DiagnosticSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Error => "error",
        }
    }
}

impl From<DiagnosticSeverity> for u8 {
    fn from(severity: DiagnosticSeverity) -> Self {
        match severity {
            DiagnosticSeverity::Warning => 1,
            DiagnosticSeverity::Error => 2,
        }
    }
}

impl TryFrom<u8> for DiagnosticSeverity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, String> {
        match value {
            1 => Ok(DiagnosticSeverity::Warning),
            2 => Ok(DiagnosticSeverity::Error),
            other => Err(format!("diagnostic severity must be 1 or 2, found {other}")),
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding reported for a source snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Rule that fired; `None` only for fatal parse failures.
    #[serde(default)]
    pub rule_id: Option<RuleId>,

    pub severity: DiagnosticSeverity,

    pub message: String,

    /// The source could not be parsed.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fatal: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl Diagnostic {
    /// A diagnostic attributed to a rule.
    pub fn new(
        rule_id: impl Into<RuleId>,
        severity: DiagnosticSeverity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: Some(rule_id.into()),
            severity,
            message: message.into(),
            fatal: false,
            line: None,
            column: None,
        }
    }

    /// A parse failure: error severity, no rule.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            rule_id: None,
            severity: DiagnosticSeverity::Error,
            message: message.into(),
            fatal: true,
            line: None,
            column: None,
        }
    }

    /// Attach a 1-based source position.
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn rule_id(&self) -> Option<&str> {
        self.rule_id.as_ref().map(RuleId::as_str)
    }

    /// Whether this diagnostic was reported by the given rule.
    pub fn is_rule(&self, id: &str) -> bool {
        self.rule_id() == Some(id)
    }
}
