//! lintstack - layered, shareable lint configurations for TypeScript
//! projects.
//!
//! Three layers build on each other: `base` (TypeScript recommended rules,
//! Prettier and import sorting), `functional` (adds functional-programming
//! rules) and `functional-library` (adds the functype plugin). Each is an
//! ordered list of configuration fragments composed last-wins into an
//! [`EffectiveConfig`](config::EffectiveConfig).
//!
//! # Modules
//!
//! - [`config`] - Fragments, layers, composition and project configuration
//! - [`harness`] - Verification harness and analysis engines
//! - [`conformance`] - Checks over the built-in layers
//! - [`presets`] - Bundler, packaging and formatter presets
//! - [`cli`] - Command-line interface
//! - [`ui`] - Terminal output
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use lintstack::harness::{Harness, MockEngine};
//!
//! let harness = Harness::new(MockEngine::new());
//! let config = lintstack::functional().unwrap();
//!
//! let diagnostics = harness.verify("let x = 1\n", config, "test.ts").unwrap();
//! assert!(diagnostics.iter().any(|d| d.is_rule("functional/no-let")));
//! ```

pub mod cli;
pub mod config;
pub mod conformance;
pub mod error;
pub mod harness;
pub mod presets;
pub mod ui;

pub use error::{LintstackError, Result};

use config::{preset, EffectiveConfig, Layer};

/// The composed `base` layer.
pub fn base() -> Result<&'static EffectiveConfig> {
    preset(Layer::Base)
}

/// The composed `functional` layer.
pub fn functional() -> Result<&'static EffectiveConfig> {
    preset(Layer::Functional)
}

/// The composed `functional-library` layer.
pub fn functional_library() -> Result<&'static EffectiveConfig> {
    preset(Layer::FunctionalLibrary)
}
