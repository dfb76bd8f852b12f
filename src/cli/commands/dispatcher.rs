//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for the global options every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, SetupArgs};
use crate::config::{default_settings_path, load_settings, Settings};
use crate::error::{Result, SetupError};
use crate::modes::EnvironmentMode;
use crate::ui::UserInterface;

/// Exit code for an unrecognised mode selector.
pub const EXIT_UNKNOWN_MODE: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Global options shared by every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    project_root: PathBuf,
    settings_path: PathBuf,
    julia: String,
}

impl CommandContext {
    /// Create a context; `settings_path` defaults to `<project>/settings.toml`.
    pub fn new(project_root: PathBuf, settings_path: Option<PathBuf>, julia: String) -> Self {
        let settings_path =
            settings_path.unwrap_or_else(|| default_settings_path(&project_root));
        Self {
            project_root,
            settings_path,
            julia,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the settings file path.
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Get the Julia executable.
    pub fn julia(&self) -> &str {
        &self.julia
    }

    /// Load the settings file.
    pub fn load_settings(&self) -> Result<Settings> {
        load_settings(&self.settings_path)
    }
}

/// Resolve the mode, turning an unknown selector into guidance.
///
/// Returns `None` when the selector was not recognised; the caller should
/// stop with [`EXIT_UNKNOWN_MODE`] without touching the project.
pub(crate) fn resolve_mode_or_guide(
    resolved: Result<EnvironmentMode>,
    settings_path: &Path,
    ui: &mut dyn UserInterface,
) -> Result<Option<EnvironmentMode>> {
    match resolved {
        Ok(mode) => Ok(Some(mode)),
        Err(e @ SetupError::UnknownMode { .. }) => {
            ui.error(&e.to_string());
            ui.show_hint(&format!(
                "Set [mode] sindbad = \"dev\" or \"run\" in {}, or pass --mode",
                settings_path.display()
            ));
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given context.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    /// Get the shared command context.
    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Setup(args)) => {
                let cmd = super::setup::SetupCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Verify(args)) => {
                let cmd = super::verify::VerifyCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::List(args)) => {
                let cmd = super::list::ListCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                // Default to setup driven entirely by the settings file
                let cmd =
                    super::setup::SetupCommand::new(self.context.clone(), SetupArgs::default());
                cmd.execute(ui)
            }
        }
    }
}
