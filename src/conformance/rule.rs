//! Conformance check definitions.
//!
//! - [`ConformanceRule`] - the trait every check implements
//! - [`CheckId`] - unique identifier for a check
//! - [`Severity`] - severity of a finding (Hint, Warning, Error)
//! - [`CheckContext`] - what a check gets to look at

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::diagnostic::ConformanceDiagnostic;
use crate::config::{LayerRegistry, RuleId};

/// Unique identifier for a conformance check.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CheckId(pub String);

impl CheckId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity level for conformance findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, does not fail the check.
    Hint,
    /// Allowed, but worth a look.
    Warning,
    /// The layers are broken.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Hint => write!(f, "hint"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Input to every conformance check.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    pub registry: &'a LayerRegistry,
    /// The harness's type-aware allow-list.
    pub type_aware_rules: &'a BTreeSet<RuleId>,
}

/// A check run over the layer registry.
pub trait ConformanceRule: Send + Sync {
    fn id(&self) -> CheckId;

    /// Human-readable name of the check.
    fn name(&self) -> &str;

    /// What this check looks for.
    fn description(&self) -> &str;

    fn default_severity(&self) -> Severity;

    fn check(&self, ctx: &CheckContext<'_>) -> Vec<ConformanceDiagnostic>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_id_display() {
        assert_eq!(CheckId::new("plugin-conflict").to_string(), "plugin-conflict");
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Hint < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn severity_display() {
        assert_eq!(Severity::Hint.to_string(), "hint");
        assert_eq!(Severity::Error.to_string(), "error");
    }
}
