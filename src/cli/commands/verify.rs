//! Verify command implementation.
//!
//! The `sindbad-env verify` command runs the verification checks for the
//! resolved mode without changing the project.

use crate::cli::args::VerifyArgs;
use crate::error::Result;
use crate::pkg::JuliaPkg;
use crate::registry::DependencyRegistry;
use crate::setup::Setup;
use crate::ui::UserInterface;
use crate::vcs::GitCli;

use super::dispatcher::{
    resolve_mode_or_guide, Command, CommandContext, CommandResult, EXIT_UNKNOWN_MODE,
};

/// The verify command implementation.
pub struct VerifyCommand {
    context: CommandContext,
    args: VerifyArgs,
}

impl VerifyCommand {
    /// Create a new verify command.
    pub fn new(context: CommandContext, args: VerifyArgs) -> Self {
        Self { context, args }
    }
}

impl Command for VerifyCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = self.context.load_settings()?;
        let registry = DependencyRegistry::builtin();
        let vcs = GitCli::new();
        let pm = JuliaPkg::new(self.context.julia());
        let setup = Setup::new(
            &registry,
            &settings,
            self.context.project_root(),
            &vcs,
            &pm,
        )
        .with_load_check(!self.args.skip_load_check);

        let resolved = setup.resolve_mode(self.args.mode.as_deref());
        let Some(mode) = resolve_mode_or_guide(resolved, self.context.settings_path(), ui)? else {
            return Ok(CommandResult::failure(EXIT_UNKNOWN_MODE));
        };

        let report = setup.verify(mode, ui)?;
        if report.all_passed() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
