//! Build presets shipped alongside the lint layers.
//!
//! These are plain option objects for the bundler, the library packager
//! and the formatter. They are returned as-is and serialized as camelCase
//! JSON, ready to be spread into the tool's own configuration file.

pub mod bundler;
pub mod formatting;
pub mod packaging;

use std::fmt;

use serde_json::Value;

use crate::error::{LintstackError, Result};

pub use bundler::{BuildOptions, BundlerPreset, ResolveOptions};
pub use formatting::{EndOfLine, FormatterPreset, TrailingComma};
pub use packaging::{packaging_targets, Banner, ModuleFormat, OutExtension, PackagingTarget};

/// The presets that can be printed by `lintstack preset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetKind {
    /// Vite-style bundler options
    Bundler,
    /// tsup-style packaging targets
    Packaging,
    /// Prettier options
    Formatter,
}

impl PresetKind {
    pub const ALL: [PresetKind; 3] = [Self::Bundler, Self::Packaging, Self::Formatter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bundler => "bundler",
            Self::Packaging => "packaging",
            Self::Formatter => "formatter",
        }
    }

    /// The preset's value for the current process environment.
    pub fn value(&self) -> Result<Value> {
        let value = match self {
            Self::Bundler => serde_json::to_value(BundlerPreset::from_env()?),
            Self::Packaging => serde_json::to_value(packaging_targets()),
            Self::Formatter => serde_json::to_value(FormatterPreset::default()),
        };
        value.map_err(|e| LintstackError::Other(e.into()))
    }
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
