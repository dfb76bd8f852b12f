//! List command implementation.
//!
//! The `sindbad-env list` command shows the managed dependencies, where
//! each one is checked out, and which source it would be cloned from.

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::config::Settings;
use crate::error::{Result, SetupError};
use crate::modes::EnvironmentMode;
use crate::registry::DependencyRegistry;
use crate::ui::{ReportRow, StatusKind, UserInterface};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// One dependency as shown by `list`.
#[derive(Debug, Serialize)]
pub struct DependencyListing {
    pub name: String,
    pub local_path: String,
    pub source: Option<String>,
    pub checked_out: bool,
    pub distinguished: bool,
    pub nested: bool,
}

/// Everything `list --json` prints.
#[derive(Debug, Serialize)]
pub struct Listing {
    pub mode: Option<&'static str>,
    pub dependencies: Vec<DependencyListing>,
}

/// The list command implementation.
pub struct ListCommand {
    context: CommandContext,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(context: CommandContext, args: ListArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }

    fn listing(&self, registry: &DependencyRegistry, settings: &Settings) -> Listing {
        let distinguished = registry.distinguished().map(|d| d.name.as_str());
        let nested: Vec<&str> = registry.nested().map(|d| d.name.as_str()).collect();

        let dependencies = registry
            .list()
            .iter()
            .map(|spec| DependencyListing {
                name: spec.name.clone(),
                local_path: spec.local_path.display().to_string(),
                source: registry.resolve_source(spec, settings).map(String::from),
                checked_out: registry
                    .checkout_path(spec, self.context.project_root())
                    .is_dir(),
                distinguished: distinguished == Some(spec.name.as_str()),
                nested: nested.contains(&spec.name.as_str()),
            })
            .collect();

        Listing {
            mode: EnvironmentMode::resolve(settings.mode_selector())
                .ok()
                .map(EnvironmentMode::as_str),
            dependencies,
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = self.context.load_settings()?;
        let registry = DependencyRegistry::builtin();
        let listing = self.listing(&registry, &settings);

        if self.args.json {
            let json = serde_json::to_string_pretty(&listing)
                .map_err(|e| SetupError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        match listing.mode {
            Some(mode) => ui.message(&format!("Configured mode: {mode}")),
            None => ui.warning(&format!(
                "Configured mode '{}' is not recognised",
                settings.mode_selector().unwrap_or_default()
            )),
        }

        let rows: Vec<ReportRow> = listing
            .dependencies
            .iter()
            .map(|dep| {
                let status = if dep.checked_out {
                    StatusKind::Success
                } else {
                    StatusKind::Skipped
                };
                let source = dep.source.as_deref().unwrap_or("(no git_url configured)");
                ReportRow::new(status, &dep.name, format!("{} <- {}", dep.local_path, source))
            })
            .collect();
        ui.show_report("Managed dependencies", &rows);

        Ok(CommandResult::success())
    }
}
