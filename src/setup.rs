//! End-to-end setup orchestration.
//!
//! [`Setup`] strings the pieces together in the order a run needs them:
//! open the active project, run the flow for the resolved mode,
//! instantiate, print the summary, and verify.

use std::path::Path;

use crate::config::Settings;
use crate::error::Result;
use crate::modes::{EnvironmentMode, FlowReport, ModeManager};
use crate::pkg::{Environment, PackageManager};
use crate::registry::DependencyRegistry;
use crate::ui::UserInterface;
use crate::vcs::VersionControl;
use crate::verify::{VerificationReport, Verifier};

/// Result of a full setup run.
#[derive(Debug)]
pub struct SetupOutcome {
    /// Mode that was applied.
    pub mode: EnvironmentMode,
    /// Per-dependency actions, including instantiation.
    pub flow: FlowReport,
    /// Post-flow verification.
    pub verification: VerificationReport,
}

impl SetupOutcome {
    /// Whether verification passed.
    pub fn success(&self) -> bool {
        self.verification.all_passed()
    }
}

/// Orchestrates a setup run against one project.
pub struct Setup<'a> {
    registry: &'a DependencyRegistry,
    settings: &'a Settings,
    project_root: &'a Path,
    vcs: &'a dyn VersionControl,
    pm: &'a dyn PackageManager,
    load_check: bool,
}

impl<'a> Setup<'a> {
    pub fn new(
        registry: &'a DependencyRegistry,
        settings: &'a Settings,
        project_root: &'a Path,
        vcs: &'a dyn VersionControl,
        pm: &'a dyn PackageManager,
    ) -> Self {
        Self {
            registry,
            settings,
            project_root,
            vcs,
            pm,
            load_check: true,
        }
    }

    /// Enable or disable the verification load check.
    pub fn with_load_check(mut self, enabled: bool) -> Self {
        self.load_check = enabled;
        self
    }

    /// Resolve the mode, preferring an explicit override to the settings.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMode` when the chosen selector is not recognised.
    pub fn resolve_mode(&self, override_mode: Option<&str>) -> Result<EnvironmentMode> {
        EnvironmentMode::resolve(override_mode.or(self.settings.mode_selector()))
    }

    /// Warn about settings tables that name unmanaged dependencies.
    pub fn warn_unrecognized(&self, ui: &mut dyn UserInterface) {
        for name in self
            .settings
            .unrecognized(|name| name == "mode" || self.registry.contains(name))
        {
            tracing::warn!("ignoring settings table [{name}]");
            ui.warning(&format!(
                "Ignoring [{name}] in settings: not a managed dependency"
            ));
        }
    }

    /// Run the flow for `mode`, instantiate, and verify.
    ///
    /// # Errors
    ///
    /// Only fails when the project itself cannot be activated. Every
    /// per-dependency failure is recorded in the outcome instead.
    pub fn run(&self, mode: EnvironmentMode, ui: &mut dyn UserInterface) -> Result<SetupOutcome> {
        tracing::info!(
            "Setting up {} in {} mode",
            self.project_root.display(),
            mode.label()
        );
        let mut env = Environment::open(self.pm, self.project_root)?;
        let manager = ModeManager::new(self.registry, self.settings, self.project_root, self.vcs);

        let mut flow = match mode {
            EnvironmentMode::Development => manager.develop(&mut env, ui),
            EnvironmentMode::Registry => manager.release(&env, ui),
        };
        manager.instantiate(&env, ui, &mut flow);

        ui.show_report("Summary", &flow.rows());

        let verification = self.verifier().verify(mode, &env, ui);
        Ok(SetupOutcome {
            mode,
            flow,
            verification,
        })
    }

    /// Run verification only. Nothing is mutated.
    pub fn verify(
        &self,
        mode: EnvironmentMode,
        ui: &mut dyn UserInterface,
    ) -> Result<VerificationReport> {
        let env = Environment::open(self.pm, self.project_root)?;
        Ok(self.verifier().verify(mode, &env, ui))
    }

    fn verifier(&self) -> Verifier<'a> {
        Verifier::new(self.registry, self.project_root).with_load_check(self.load_check)
    }
}
