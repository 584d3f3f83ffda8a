//! Conformance checks over the built-in layers.
//!
//! Each check implements [`ConformanceRule`] and inspects the
//! [`LayerRegistry`](crate::config::LayerRegistry) as a whole: whether
//! every layer extends its parent, whether plugin names are registered
//! consistently, whether a layer quietly turns off something its parent
//! enables, and whether the type-aware allow-list covers the catalog.

pub mod diagnostic;
pub mod output;
pub mod registry;
pub mod rule;
pub mod rules;

pub use diagnostic::ConformanceDiagnostic;
pub use output::{ConformanceFormatter, HumanFormatter, JsonFormatter, OutputFormat};
pub use registry::CheckRegistry;
pub use rule::{CheckContext, CheckId, ConformanceRule, Severity};
pub use rules::{
    ExtensionInvariantRule, InheritedRuleDisabledRule, PluginConflictRule, TypeAwareAllowListRule,
};
