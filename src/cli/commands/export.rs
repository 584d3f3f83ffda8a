//! The `export` command: render a configuration as `eslint.config.mjs`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::ExportArgs;
use crate::error::Result;
use crate::harness::render_module;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::target::ConfigTarget;

/// The `export` command.
pub struct ExportCommand {
    project_root: PathBuf,
    args: ExportArgs,
}

impl ExportCommand {
    pub fn new(project_root: &Path, args: ExportArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for ExportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let target = ConfigTarget::resolve(&self.project_root, self.args.layer)?;
        let header = format!(
            "Generated by lintstack {} from {}. Do not edit.",
            env!("CARGO_PKG_VERSION"),
            target.label
        );
        let module = render_module(&target.effective, &header)?;

        match &self.args.output {
            Some(path) => {
                let path = self.project_root.join(path);
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, module)?;
                ui.success(&format!("Wrote {}", path.display()));
            }
            None => ui.output(&module),
        }
        Ok(CommandResult::success())
    }
}
