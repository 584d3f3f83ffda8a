//! Packaging preset: how this tool's own TypeScript entry points are
//! compiled for publishing.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    Esm,
    Cjs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutExtension {
    pub js: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub js: String,
}

/// One packaging target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagingTarget {
    pub entry: Vec<String>,
    pub format: Vec<ModuleFormat>,
    pub dts: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub clean: bool,
    pub out_dir: String,
    pub splitting: bool,
    pub sourcemap: bool,
    pub minify: bool,
    pub bundle: bool,
    pub skip_node_modules_bundle: bool,
    pub target: String,
    pub out_extension: OutExtension,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,
}

impl PackagingTarget {
    /// Unbundled ESM output into `dist` with `.js` extensions.
    fn esm(entry: &[&str]) -> Self {
        Self {
            entry: entry.iter().map(|e| e.to_string()).collect(),
            format: vec![ModuleFormat::Esm],
            dts: false,
            clean: false,
            out_dir: "dist".to_string(),
            splitting: false,
            sourcemap: false,
            minify: false,
            bundle: false,
            skip_node_modules_bundle: true,
            target: "es2022".to_string(),
            out_extension: OutExtension {
                js: ".js".to_string(),
            },
            banner: None,
        }
    }
}

/// The two targets: config entry points (cleans `dist`) and the CLI
/// (with a node shebang banner).
pub fn packaging_targets() -> Vec<PackagingTarget> {
    let library = PackagingTarget {
        clean: true,
        ..PackagingTarget::esm(&["src/tsup.config.base.ts", "src/vitest.config.base.ts"])
    };
    let cli = PackagingTarget {
        banner: Some(Banner {
            js: "#!/usr/bin/env node".to_string(),
        }),
        ..PackagingTarget::esm(&["src/cli.ts"])
    };
    vec![library, cli]
}
