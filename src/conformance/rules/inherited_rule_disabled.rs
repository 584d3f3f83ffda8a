//! Inherited rules turned off.
//!
//! A layer may turn off a rule its parent enables. That is a legal
//! override, but it weakens the "superset" reading of the layers, so it is
//! reported for review.

use crate::config::Layer;
use crate::conformance::{CheckContext, CheckId, ConformanceDiagnostic, ConformanceRule, Severity};

/// Reports rules enabled by a parent layer and turned off by a child.
pub struct InheritedRuleDisabledRule;

impl ConformanceRule for InheritedRuleDisabledRule {
    fn id(&self) -> CheckId {
        CheckId::new("inherited-rule-disabled")
    }

    fn name(&self) -> &str {
        "Inherited Rule Disabled"
    }

    fn description(&self) -> &str {
        "Detects rules a layer turns off although the layer beneath enables them"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Vec<ConformanceDiagnostic> {
        let mut diagnostics = Vec::new();

        for layer in Layer::ALL {
            let Some(parent) = layer.parent() else {
                continue;
            };
            let parent_config = ctx.registry.effective(parent);
            let child = ctx.registry.definition(layer);

            for id in parent_config.enabled_rules() {
                let disabled = child
                    .effective
                    .rules
                    .get(id)
                    .is_some_and(|setting| !setting.is_enabled());
                if !disabled {
                    continue;
                }

                // Last fragment that sets the rule is the one turning it off.
                let culprit = child
                    .fragments
                    .iter()
                    .rev()
                    .find(|f| f.rules.contains_key(id))
                    .map(|f| f.label().to_string());

                let mut diag = ConformanceDiagnostic::new(
                    self.id(),
                    self.default_severity(),
                    format!("Rule '{id}' is enabled in '{parent}' but turned off in '{layer}'"),
                )
                .with_layer(layer);
                if let Some(fragment) = culprit {
                    diag = diag.with_fragment(fragment);
                }
                diagnostics.push(diag);
            }
        }

        diagnostics
    }
}
