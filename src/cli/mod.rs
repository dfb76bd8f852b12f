//! Command-line interface for sindbad-env.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, ListArgs, SetupArgs, VerifyArgs};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};
