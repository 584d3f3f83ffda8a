//! Terminal output.
//!
//! Commands never print directly; they talk to a [`UserInterface`] so
//! tests can swap in [`MockUI`] and assert on what would have been shown.
//!
//! # Example
//!
//! ```
//! use lintstack::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Composing layer functional");
//! ui.success("All layers conform");
//!
//! assert!(ui.has_message("Composing layer functional"));
//! assert!(ui.has_success("All layers conform"));
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, LintstackTheme};

/// Trait for user interface interactions.
///
/// `output` carries a command's result (a rendered config, JSON, a
/// report) and is never suppressed. Everything else is status and follows
/// the [`OutputMode`].
pub trait UserInterface {
    fn output_mode(&self) -> OutputMode;

    fn set_output_mode(&mut self, mode: OutputMode);

    /// The theme used to style text handed to [`UserInterface::output`].
    fn theme(&self) -> &LintstackTheme;

    /// Write a command result.
    fn output(&mut self, text: &str);

    /// Display a status message.
    fn message(&mut self, msg: &str);

    /// Display detail shown only in verbose mode.
    fn detail(&mut self, msg: &str);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    /// Display an error. Errors are shown in every mode.
    fn error(&mut self, msg: &str);

    fn show_header(&mut self, title: &str);

    fn show_hint(&mut self, hint: &str);
}
