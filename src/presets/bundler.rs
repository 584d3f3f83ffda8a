//! Bundler preset for single-page applications.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    pub out_dir: String,
    pub sourcemap: bool,
    pub target: String,
    pub minify: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveOptions {
    pub alias: BTreeMap<String, String>,
}

/// Bundler options: `dist` output with sourcemaps, an `@` alias for `src`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerPreset {
    pub build: BuildOptions,
    pub resolve: ResolveOptions,
}

impl BundlerPreset {
    /// Preset for an explicit `NODE_ENV` and working directory.
    ///
    /// Output is minified only when `node_env` is exactly `production`.
    pub fn new(node_env: Option<&str>, cwd: &Path) -> Self {
        let alias = BTreeMap::from([(
            "@".to_string(),
            cwd.join("src").to_string_lossy().into_owned(),
        )]);

        Self {
            build: BuildOptions {
                out_dir: "dist".to_string(),
                sourcemap: true,
                target: "es2020".to_string(),
                minify: node_env == Some("production"),
            },
            resolve: ResolveOptions { alias },
        }
    }

    /// Preset for the current process: reads `NODE_ENV` and the working
    /// directory.
    pub fn from_env() -> Result<Self> {
        let node_env = std::env::var("NODE_ENV").ok();
        let cwd = std::env::current_dir()?;
        Ok(Self::new(node_env.as_deref(), &cwd))
    }
}
