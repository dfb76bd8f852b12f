//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`]; running the binary without a
//! subcommand performs `setup`.

pub mod completions;
pub mod dispatcher;
pub mod list;
pub mod setup;
pub mod verify;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
