//! Lint configuration model, layers and project configuration.
//!
//! - Fragments and typed settings in [`fragment`]
//! - Composition into an [`EffectiveConfig`] in [`composer`]
//! - The embedded `base` / `functional` / `functional-library` layers in
//!   [`layers`], with rule metadata in [`catalog`]
//! - Downstream `.lintstack.yml` files in [`project`], layered with
//!   [`merger`]
//!
//! # Example
//!
//! ```
//! use lintstack::config::{build_layer, compose};
//!
//! let fragments = build_layer("functional").unwrap();
//! let config = compose(&fragments).unwrap();
//! assert!(config.is_rule_enabled("functional/no-let"));
//! ```

pub mod catalog;
pub mod composer;
pub mod fragment;
pub mod layers;
pub mod merger;
pub mod project;

pub use catalog::RuleCatalog;
pub use composer::{compose, EffectiveConfig, PluginConflict};
pub use fragment::{
    Fragment, GlobalAccess, LanguageOptions, PluginHandle, RuleId, RuleSetting, Severity,
    SourceType,
};
pub use layers::{build_layer, preset, Layer, LayerDefinition, LayerRegistry};
pub use merger::{deep_merge, merge_configs};
pub use project::{
    find_project_root, load_project_config, EngineConfig, ProjectConfig, ProjectPaths,
};
