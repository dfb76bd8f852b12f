//! Registry flow.

use crate::pkg::{Environment, RemoveOutcome};
use crate::ui::{StatusKind, UserInterface};

use super::{FlowAction, FlowReport, ModeManager};

impl ModeManager<'_> {
    /// Run the registry flow against `env`.
    ///
    /// Every registry dependency is removed from the active project, whether
    /// or not it is currently registered, and then the distinguished
    /// dependency is added back by name so the package manager resolves it
    /// from the registry.
    pub fn release(&self, env: &Environment<'_>, ui: &mut dyn UserInterface) -> FlowReport {
        let mut report = FlowReport::new();

        ui.show_header("Removing development dependencies");
        for spec in self.registry.list() {
            match env.remove(&spec.name) {
                Ok(RemoveOutcome::Removed) => {
                    ui.success(&format!("Removed {}", spec.name));
                    report.record(&spec.name, FlowAction::Remove, StatusKind::Success, "removed");
                }
                Ok(RemoveOutcome::NotRegistered) => {
                    tracing::debug!("{} was not registered", spec.name);
                    report.record(
                        &spec.name,
                        FlowAction::Remove,
                        StatusKind::Success,
                        "not registered",
                    );
                }
                Err(e) => {
                    ui.error(&format!("{}: remove failed: {}", spec.name, e.summary()));
                    report.record(&spec.name, FlowAction::Remove, StatusKind::Failed, e.summary());
                }
            }
        }

        let Some(parent) = self.registry.distinguished() else {
            return report;
        };

        ui.show_header(&format!("Adding {} from the registry", parent.name));
        let mut spinner = ui.start_spinner(&format!("Adding {}...", parent.name));
        match env.add(&parent.name) {
            Ok(()) => {
                spinner.finish_success(&format!("{} added", parent.name));
                report.record(
                    &parent.name,
                    FlowAction::Add,
                    StatusKind::Success,
                    "resolved from registry",
                );
            }
            Err(e) => {
                spinner.finish_error(&format!("{}: add failed", parent.name));
                report.record(&parent.name, FlowAction::Add, StatusKind::Failed, e.summary());
            }
        }

        report
    }
}
