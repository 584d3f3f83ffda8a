//! Verification harness.
//!
//! The harness runs real source snippets through a composed configuration
//! and returns what the analysis engine reported, so tests can assert that
//! a layer actually behaves as intended.
//!
//! Snippets are analyzed without a type checker. Before each run the
//! configuration is sanitized ([`sanitize`]): type-information parser
//! options are stripped and rules that need them are turned off.
//!
//! # Overview
//!
//! - **Engine** - the [`AnalysisEngine`] boundary, with the process-backed
//!   [`EslintEngine`] and the deterministic [`MockEngine`]
//! - **Harness** - [`Harness::verify`] and [`Harness::verify_batch`]
//! - **Diagnostics** - [`Diagnostic`], shaped like ESLint's JSON messages
//! - **Reports** - [`VerifyReport`] for the `verify` command

pub mod diagnostic;
pub mod engine;
pub mod eslint;
pub mod mock;
pub mod render;
pub mod report;
pub mod sanitize;
pub mod verify;

pub use diagnostic::{Diagnostic, DiagnosticSeverity};
pub use engine::{AnalysisEngine, SourceKind};
pub use eslint::EslintEngine;
pub use mock::MockEngine;
pub use render::render_module;
pub use report::{FileReport, ReportSummary, VerifyReport};
pub use sanitize::{
    default_type_aware_rules, sanitize, TYPE_AWARE_RULES, TYPE_INFORMATION_OPTIONS,
};
pub use verify::{Harness, Snippet, SnippetOutcome};
