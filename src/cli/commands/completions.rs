//! Shell completions generation.

use clap::CommandFactory;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::{LintstackError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The `completions` command.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }

    fn generate(&self) -> Result<String> {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        clap_complete::generate(self.args.shell, &mut cmd, "lintstack", &mut buf);
        String::from_utf8(buf).map_err(|e| LintstackError::Other(e.into()))
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.output(&self.generate()?);
        Ok(CommandResult::success())
    }
}
