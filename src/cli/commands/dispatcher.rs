//! Command dispatching.
//!
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

use super::check::CheckCommand;
use super::completions::CompletionsCommand;
use super::export::ExportCommand;
use super::layers::LayersCommand;
use super::preset::PresetCommand;
use super::schema::SchemaCommand;
use super::show::ShowCommand;
use super::verify::VerifyCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, reporting through `ui`.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Route the CLI subcommand to its implementation and execute it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let root = &self.project_root;
        match &cli.command {
            Commands::Layers(args) => LayersCommand::new(args.clone()).execute(ui),
            Commands::Show(args) => ShowCommand::new(root, args.clone()).execute(ui),
            Commands::Check(args) => CheckCommand::new(root, args.clone()).execute(ui),
            Commands::Verify(args) => VerifyCommand::new(root, args.clone()).execute(ui),
            Commands::Export(args) => ExportCommand::new(root, args.clone()).execute(ui),
            Commands::Preset(args) => PresetCommand::new(args.clone()).execute(ui),
            Commands::Schema => SchemaCommand.execute(ui),
            Commands::Completions(args) => CompletionsCommand::new(args.clone()).execute(ui),
        }
    }
}
