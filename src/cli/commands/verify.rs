//! The `verify` command: run project files through the harness.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::cli::args::{EngineKind, VerifyArgs};
use crate::config::LayerRegistry;
use crate::conformance::OutputFormat;
use crate::error::Result;
use crate::harness::{EslintEngine, FileReport, Harness, MockEngine, Snippet, VerifyReport};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::target::ConfigTarget;

/// A requested file before analysis.
enum Pending {
    Ignored(String),
    Unreadable(String, String),
    Snippet(Snippet),
}

/// Resolve `..` and `.` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// The `verify` command.
pub struct VerifyCommand {
    project_root: PathBuf,
    working_dir: PathBuf,
    args: VerifyArgs,
}

impl VerifyCommand {
    /// File arguments resolve against the process working directory.
    pub fn new(project_root: &Path, args: VerifyArgs) -> Self {
        let working_dir =
            std::env::current_dir().unwrap_or_else(|_| project_root.to_path_buf());
        Self {
            project_root: project_root.to_path_buf(),
            working_dir,
            args,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// The on-disk path of a file argument and its name relative to the
    /// project root (the absolute path when it lies outside the root).
    fn locate(&self, arg: &Path) -> (PathBuf, PathBuf) {
        let root = normalize(&self.working_dir.join(&self.project_root));
        let path = normalize(&self.working_dir.join(arg));
        let relative = path
            .strip_prefix(&root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.clone());
        (path, relative)
    }

    fn build_harness(&self, target: &ConfigTarget) -> Result<Harness> {
        let harness = match self.args.engine {
            EngineKind::Eslint => Harness::new(EslintEngine::from_config(
                &self.project_root,
                &target.project.engine,
            )),
            EngineKind::Mock => {
                Harness::new(MockEngine::from_catalog(LayerRegistry::builtin()?.catalog()))
            }
        };
        Ok(harness.with_type_aware_rules(target.project.type_aware_rules.iter().cloned()))
    }

    fn collect(&self, target: &ConfigTarget) -> Result<Vec<Pending>> {
        let mut pending = Vec::with_capacity(self.args.files.len());
        for arg in &self.args.files {
            let (path, relative) = self.locate(arg);
            let name = relative.to_string_lossy().into_owned();

            if target.effective.is_ignored(&relative)? {
                debug!("Skipping ignored file {}", name);
                pending.push(Pending::Ignored(name));
                continue;
            }

            match fs::read_to_string(&path) {
                Ok(source) => pending.push(Pending::Snippet(Snippet::new(name, source))),
                Err(e) => pending.push(Pending::Unreadable(name, format!("Could not read: {e}"))),
            }
        }
        Ok(pending)
    }
}

impl Command for VerifyCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let target = ConfigTarget::resolve(&self.project_root, self.args.layer)?;
        let harness = self.build_harness(&target)?;
        ui.message(&format!(
            "Verifying {} file(s) against {} with {}",
            self.args.files.len(),
            target.label,
            harness.engine().name()
        ));

        let pending = self.collect(&target)?;
        let snippets: Vec<Snippet> = pending
            .iter()
            .filter_map(|p| match p {
                Pending::Snippet(snippet) => Some(snippet.clone()),
                _ => None,
            })
            .collect();
        let mut outcomes = harness.verify_batch(&snippets, &target.effective)?.into_iter();

        let mut files = Vec::with_capacity(pending.len());
        for entry in pending {
            let report = match entry {
                Pending::Ignored(name) => FileReport::ignored(name),
                Pending::Unreadable(filename, error) => FileReport {
                    filename,
                    diagnostics: Vec::new(),
                    error: Some(error),
                    ignored: false,
                },
                Pending::Snippet(_) => match outcomes.next() {
                    Some(outcome) => FileReport::from(outcome),
                    None => continue,
                },
            };
            ui.detail(&format!(
                "{}: {} diagnostic(s)",
                report.filename,
                report.diagnostics.len()
            ));
            files.push(report);
        }

        let report = VerifyReport::new(files);
        match self.args.format {
            OutputFormat::Json => ui.output(&report.to_json()?),
            OutputFormat::Human => {
                let text = report.to_human(ui.theme());
                ui.output(&text);
            }
        }

        if report.has_errors() {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
