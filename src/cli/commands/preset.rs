//! The `preset` command: print a build preset as JSON.

use crate::cli::args::PresetArgs;
use crate::error::{LintstackError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The `preset` command.
pub struct PresetCommand {
    args: PresetArgs,
}

impl PresetCommand {
    pub fn new(args: PresetArgs) -> Self {
        Self { args }
    }
}

impl Command for PresetCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let value = self.args.kind.value()?;
        let json =
            serde_json::to_string_pretty(&value).map_err(|e| LintstackError::Other(e.into()))?;
        ui.output(&json);
        Ok(CommandResult::success())
    }
}
