//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed to by
//! [`CommandDispatcher`].

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod export;
pub mod layers;
pub mod preset;
pub mod schema;
pub mod show;
pub mod target;
pub mod verify;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
