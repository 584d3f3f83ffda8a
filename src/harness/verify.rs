//! The verification harness.

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use super::diagnostic::Diagnostic;
use super::engine::{AnalysisEngine, SourceKind};
use super::sanitize::{default_type_aware_rules, sanitize};
use crate::config::{EffectiveConfig, RuleId};
use crate::error::Result;

/// A source snippet to verify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub filename: String,
    pub source: String,
}

impl Snippet {
    pub fn new(filename: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            source: source.into(),
        }
    }
}

/// Result of verifying one snippet of a batch.
#[derive(Debug)]
pub struct SnippetOutcome {
    pub filename: String,
    pub result: Result<Vec<Diagnostic>>,
}

/// Runs source snippets through a composed configuration.
///
/// The harness owns no mutable state; one instance may verify many
/// snippets, from several threads at once.
pub struct Harness {
    engine: Box<dyn AnalysisEngine>,
    type_aware_rules: BTreeSet<RuleId>,
}

impl Harness {
    /// A harness over `engine` with the built-in type-aware allow-list.
    pub fn new(engine: impl AnalysisEngine + 'static) -> Self {
        Self {
            engine: Box::new(engine),
            type_aware_rules: default_type_aware_rules(),
        }
    }

    /// Add rules to the type-aware allow-list.
    pub fn with_type_aware_rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RuleId>,
    {
        self.type_aware_rules
            .extend(rules.into_iter().map(Into::into));
        self
    }

    pub fn engine(&self) -> &dyn AnalysisEngine {
        self.engine.as_ref()
    }

    /// Rules turned off before every analysis.
    pub fn type_aware_rules(&self) -> &BTreeSet<RuleId> {
        &self.type_aware_rules
    }

    /// Analyze one snippet under `config`.
    ///
    /// Fails with [`UnrecognizedExtension`](crate::LintstackError::UnrecognizedExtension)
    /// before touching the engine when `filename` has no known extension.
    /// Unparsable source is not an error: it yields one fatal diagnostic.
    pub fn verify(
        &self,
        source: &str,
        config: &EffectiveConfig,
        filename: &str,
    ) -> Result<Vec<Diagnostic>> {
        let kind = SourceKind::from_filename(filename)?;
        let sanitized = sanitize(config, &self.type_aware_rules)?;
        self.analyze(source, &sanitized, filename, kind)
    }

    /// Analyze many snippets independently under `config`.
    ///
    /// The configuration is sanitized once; a snippet that fails does not
    /// affect the others. Returns one outcome per snippet, in input order.
    pub fn verify_batch(
        &self,
        snippets: &[Snippet],
        config: &EffectiveConfig,
    ) -> Result<Vec<SnippetOutcome>> {
        let sanitized = sanitize(config, &self.type_aware_rules)?;

        Ok(snippets
            .iter()
            .map(|snippet| SnippetOutcome {
                filename: snippet.filename.clone(),
                result: SourceKind::from_filename(&snippet.filename).and_then(|kind| {
                    self.analyze(&snippet.source, &sanitized, &snippet.filename, kind)
                }),
            })
            .collect())
    }

    fn analyze(
        &self,
        source: &str,
        sanitized: &EffectiveConfig,
        filename: &str,
        kind: SourceKind,
    ) -> Result<Vec<Diagnostic>> {
        debug!(
            "Verifying {} ({}) with engine '{}'",
            filename,
            kind,
            self.engine.name()
        );

        let diagnostics = self.engine.analyze(source, sanitized, filename)?;

        debug!("{}: {} diagnostic(s)", filename, diagnostics.len());
        Ok(diagnostics)
    }
}

impl fmt::Debug for Harness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Harness")
            .field("engine", &self.engine.name())
            .field("type_aware_rules", &self.type_aware_rules)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{compose, Fragment, RuleSetting};
    use crate::harness::diagnostic::DiagnosticSeverity;
    use crate::LintstackError;

    /// Reports every enabled rule once, in rule order.
    struct EchoEngine;

    impl AnalysisEngine for EchoEngine {
        fn name(&self) -> &str {
            "echo"
        }

        fn analyze(
            &self,
            _source: &str,
            config: &EffectiveConfig,
            _filename: &str,
        ) -> Result<Vec<Diagnostic>> {
            Ok(config
                .enabled_rules()
                .map(|id| Diagnostic::new(id.clone(), DiagnosticSeverity::Error, "fired"))
                .collect())
        }
    }

    struct BrokenEngine;

    impl AnalysisEngine for BrokenEngine {
        fn name(&self) -> &str {
            "broken"
        }

        fn analyze(&self, _: &str, _: &EffectiveConfig, _: &str) -> Result<Vec<Diagnostic>> {
            Err(LintstackError::EngineFailed {
                command: "broken".to_string(),
                message: "not installed".to_string(),
            })
        }
    }

    fn config() -> EffectiveConfig {
        compose(&[Fragment::named("rules")
            .with_rule("no-undef", RuleSetting::error())
            .with_rule("@typescript-eslint/await-thenable", RuleSetting::error())])
        .unwrap()
    }

    #[test]
    fn verify_rejects_unknown_extension_before_engine_runs() {
        let harness = Harness::new(BrokenEngine);
        let err = harness.verify("const x = 1", &config(), "notes.md").unwrap_err();
        assert!(matches!(err, LintstackError::UnrecognizedExtension { .. }));
    }

    #[test]
    fn verify_passes_sanitized_config_to_engine() {
        let harness = Harness::new(EchoEngine);
        let diagnostics = harness.verify("", &config(), "test.ts").unwrap();

        let ids: Vec<_> = diagnostics.iter().filter_map(Diagnostic::rule_id).collect();
        assert_eq!(ids, ["no-undef"]);
    }

    #[test]
    fn extra_type_aware_rules_are_disabled() {
        let harness = Harness::new(EchoEngine).with_type_aware_rules(["no-undef"]);
        let diagnostics = harness.verify("", &config(), "test.ts").unwrap();
        assert!(diagnostics.is_empty());
        assert!(harness
            .type_aware_rules()
            .contains(&RuleId::new("no-undef")));
    }

    #[test]
    fn engine_failure_propagates() {
        let harness = Harness::new(BrokenEngine);
        let err = harness.verify("", &config(), "test.ts").unwrap_err();
        assert!(matches!(err, LintstackError::EngineFailed { .. }));
    }

    #[test]
    fn batch_returns_one_outcome_per_snippet() {
        let harness = Harness::new(EchoEngine);
        let snippets = vec![
            Snippet::new("a.ts", ""),
            Snippet::new("b.txt", ""),
            Snippet::new("c.js", ""),
        ];

        let outcomes = harness.verify_batch(&snippets, &config()).unwrap();

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].filename, "a.ts");
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());
        assert!(outcomes[2].result.is_ok());
    }

    #[test]
    fn harness_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Harness>();
    }
}
