//! Setup command implementation.
//!
//! The `sindbad-env setup` command (also the default when no subcommand is
//! given) applies the configured mode, instantiates the project, and
//! verifies the result.

use crate::cli::args::SetupArgs;
use crate::error::Result;
use crate::modes::EnvironmentMode;
use crate::pkg::JuliaPkg;
use crate::registry::DependencyRegistry;
use crate::setup::Setup;
use crate::shell::is_available;
use crate::ui::UserInterface;
use crate::vcs::GitCli;

use super::dispatcher::{
    resolve_mode_or_guide, Command, CommandContext, CommandResult, EXIT_UNKNOWN_MODE,
};

/// The setup command implementation.
pub struct SetupCommand {
    context: CommandContext,
    args: SetupArgs,
}

impl SetupCommand {
    /// Create a new setup command.
    pub fn new(context: CommandContext, args: SetupArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &SetupArgs {
        &self.args
    }

    fn preflight(&self, mode: EnvironmentMode, vcs: &GitCli, ui: &mut dyn UserInterface) {
        if mode == EnvironmentMode::Development && !is_available(vcs.program()) {
            ui.warning("git was not found on PATH; clones and pulls will fail");
        }
        if !is_available(self.context.julia()) {
            ui.warning(&format!(
                "'{}' was not found; package operations will fail",
                self.context.julia()
            ));
            ui.show_hint("Pass --julia <PATH> or set SINDBAD_JULIA");
        }
    }
}

impl Command for SetupCommand {
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

        setup.warn_unrecognized(ui);

        let resolved = setup.resolve_mode(self.args.mode.as_deref());
        let Some(mode) = resolve_mode_or_guide(resolved, self.context.settings_path(), ui)? else {
            return Ok(CommandResult::failure(EXIT_UNKNOWN_MODE));
        };

        ui.show_header(&format!("SINDBAD environment: {} mode", mode.label()));
        self.preflight(mode, &vcs, ui);
        if mode == EnvironmentMode::Development && !ui.is_interactive() && !self.args.yes {
            ui.show_hint(
                "Running non-interactively: existing checkouts are kept as they are (use --yes to pull)",
            );
        }

        let outcome = setup.run(mode, ui)?;
        if outcome.success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
