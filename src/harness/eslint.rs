//! ESLint process engine.
//!
//! Renders the configuration to a temporary `eslint.config.*.mjs` under
//! `<project>/node_modules/.cache/lintstack/` (so plugin imports resolve
//! against the project's own `node_modules`) and runs
//!
//! ```text
//! <command> --stdin --stdin-filename <file> --format json --config <module>
//! ```
//!
//! ESLint exits 0 when clean and 1 when it reported problems; both are
//! successful runs. Any other exit status means ESLint itself failed.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;
use tracing::{debug, warn};

use super::diagnostic::Diagnostic;
use super::engine::AnalysisEngine;
use super::render::render_module;
use crate::config::project::DEFAULT_ENGINE_COMMAND;
use crate::config::{EffectiveConfig, EngineConfig};
use crate::error::{LintstackError, Result};

/// Directory, relative to the project root, holding rendered configs.
pub const CACHE_DIR: &str = "node_modules/.cache/lintstack";

/// One file entry of ESLint's JSON formatter output.
#[derive(Debug, Deserialize)]
struct FileResult {
    #[serde(default)]
    messages: Vec<Diagnostic>,
}

/// Runs the `eslint` CLI as a child process.
#[derive(Debug, Clone)]
pub struct EslintEngine {
    program: String,
    prefix_args: Vec<String>,
    extra_args: Vec<String>,
    project_root: PathBuf,
}

impl EslintEngine {
    /// Engine running `npx eslint` in `project_root`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            program: String::new(),
            prefix_args: Vec::new(),
            extra_args: Vec::new(),
            project_root: project_root.into(),
        }
        .with_command(DEFAULT_ENGINE_COMMAND)
    }

    /// Engine configured from a project's `engine` section.
    pub fn from_config(project_root: impl Into<PathBuf>, config: &EngineConfig) -> Self {
        Self::new(project_root)
            .with_command(config.command())
            .with_args(config.args.iter().cloned())
    }

    /// Replace the command line prefix, split on whitespace.
    pub fn with_command(mut self, command: &str) -> Self {
        let mut words = command.split_whitespace().map(str::to_string);
        self.program = words.next().unwrap_or_default();
        self.prefix_args = words.collect();
        self
    }

    /// Append arguments after the engine's own.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The full command prefix as typed by a user.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.prefix_args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.project_root.join(CACHE_DIR)
    }

    fn failed(&self, message: impl Into<String>) -> LintstackError {
        LintstackError::EngineFailed {
            command: self.command_line(),
            message: message.into(),
        }
    }

    fn write_config(&self, config: &EffectiveConfig) -> Result<tempfile::NamedTempFile> {
        let dir = self.cache_dir();
        fs::create_dir_all(&dir)?;

        let module = render_module(config, "Generated by lintstack for one verification run.")?;
        let mut file = tempfile::Builder::new()
            .prefix("eslint.config.")
            .suffix(".mjs")
            .tempfile_in(&dir)?;
        file.write_all(module.as_bytes())?;
        file.flush()?;
        Ok(file)
    }

    fn run(&self, source: &str, filename: &str, config_path: &Path) -> Result<String> {
        if self.program.is_empty() {
            return Err(self.failed("empty engine command"));
        }

        let mut child = Command::new(&self.program)
            .args(&self.prefix_args)
            .args(["--stdin", "--stdin-filename", filename, "--format", "json"])
            .arg("--config")
            .arg(config_path)
            .args(&self.extra_args)
            .current_dir(&self.project_root)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.failed(format!("could not start: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| self.failed(format!("could not write source: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| self.failed(e.to_string()))?;

        match output.status.code() {
            Some(0) | Some(1) => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
            code => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let detail = stderr.trim();
                let status = code.map_or("terminated by signal".to_string(), |c| {
                    format!("exit code {c}")
                });
                Err(self.failed(if detail.is_empty() {
                    status
                } else {
                    format!("{status}: {detail}")
                }))
            }
        }
    }
}

impl AnalysisEngine for EslintEngine {
    fn name(&self) -> &str {
        "eslint"
    }

    fn analyze(
        &self,
        source: &str,
        config: &EffectiveConfig,
        filename: &str,
    ) -> Result<Vec<Diagnostic>> {
        let config_file = self.write_config(config)?;
        debug!(
            "Running '{}' on {} with {}",
            self.command_line(),
            filename,
            config_file.path().display()
        );

        let stdout = self.run(source, filename, config_file.path())?;
        let diagnostics = parse_output(&stdout).map_err(|e| self.failed(e))?;

        if let Err(e) = config_file.close() {
            warn!("Failed to remove rendered config: {}", e);
        }
        Ok(diagnostics)
    }
}

/// Flatten ESLint's JSON output into diagnostics, keeping engine order.
///
/// A message without a rule id that is not a parse failure is ESLint
/// talking about the run itself (the file was ignored, or no config entry
/// matched it), so no rule was checked and the run counts as failed.
pub fn parse_output(stdout: &str) -> std::result::Result<Vec<Diagnostic>, String> {
    let files: Vec<FileResult> = serde_json::from_str(stdout.trim())
        .map_err(|e| format!("unreadable JSON output: {e}"))?;
    let diagnostics: Vec<Diagnostic> = files.into_iter().flat_map(|f| f.messages).collect();

    if let Some(notice) = diagnostics
        .iter()
        .find(|d| d.rule_id.is_none() && !d.fatal)
    {
        return Err(format!("file was not linted: {}", notice.message));
    }
    Ok(diagnostics)
}
