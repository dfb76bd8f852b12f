//! Post-flow verification.
//!
//! [`Verifier`] runs read-only checks that the active project matches the
//! expected [`EnvironmentMode`] and returns a [`VerificationReport`].
//! Mismatches are never raised as errors; they become failing checks that
//! the caller renders as warnings.
//!
//! The optional load check asks the package manager where each package
//! resolves from. A fresh process may not see registrations made moments
//! ago, so a failed load is recorded as informational rather than failing.

pub mod develop;
pub mod manifest;
pub mod release;

pub use manifest::{is_development_path, is_registry_path, ManifestText, LOCAL_PATH_MARKER};

use std::path::Path;

use serde::Serialize;

use crate::modes::EnvironmentMode;
use crate::pkg::Environment;
use crate::registry::DependencyRegistry;
use crate::ui::{ReportRow, StatusKind, UserInterface};

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckOutcome {
    Pass,
    Fail,
    /// Diagnostic note that does not affect the overall result.
    Info,
}

impl CheckOutcome {
    fn status(self) -> StatusKind {
        match self {
            Self::Pass => StatusKind::Success,
            Self::Fail => StatusKind::Warning,
            Self::Info => StatusKind::Info,
        }
    }
}

/// A single verification check.
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    pub name: String,
    pub outcome: CheckOutcome,
    pub detail: String,
}

/// All checks from one verification run.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub mode: &'static str,
    pub checks: Vec<Check>,
}

impl VerificationReport {
    pub fn new(mode: EnvironmentMode) -> Self {
        Self {
            mode: mode.as_str(),
            checks: Vec::new(),
        }
    }

    pub fn pass(&mut self, name: impl Into<String>, detail: impl Into<String>) {
        self.push(name, CheckOutcome::Pass, detail);
    }

    pub fn fail(&mut self, name: impl Into<String>, detail: impl Into<String>) {
        self.push(name, CheckOutcome::Fail, detail);
    }

    pub fn info(&mut self, name: impl Into<String>, detail: impl Into<String>) {
        self.push(name, CheckOutcome::Info, detail);
    }

    /// Record a pass or a fail depending on `ok`.
    pub fn check(
        &mut self,
        ok: bool,
        name: impl Into<String>,
        pass_detail: impl Into<String>,
        fail_detail: impl Into<String>,
    ) {
        if ok {
            self.pass(name, pass_detail);
        } else {
            self.fail(name, fail_detail);
        }
    }

    fn push(&mut self, name: impl Into<String>, outcome: CheckOutcome, detail: impl Into<String>) {
        self.checks.push(Check {
            name: name.into(),
            outcome,
            detail: detail.into(),
        });
    }

    /// True when no check failed. Informational notes do not count.
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.outcome != CheckOutcome::Fail)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| c.outcome == CheckOutcome::Fail)
    }

    /// Find a check by name.
    pub fn find(&self, name: &str) -> Option<&Check> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// Rows for the summary table.
    pub fn rows(&self) -> Vec<ReportRow> {
        self.checks
            .iter()
            .map(|c| ReportRow::new(c.outcome.status(), &c.name, &c.detail))
            .collect()
    }
}

/// Runs the verification checks for a mode.
pub struct Verifier<'a> {
    registry: &'a DependencyRegistry,
    project_root: &'a Path,
    load_check: bool,
}

impl<'a> Verifier<'a> {
    /// Create a verifier with the load check enabled.
    pub fn new(registry: &'a DependencyRegistry, project_root: &'a Path) -> Self {
        Self {
            registry,
            project_root,
            load_check: true,
        }
    }

    /// Enable or disable the load-and-inspect diagnostic.
    pub fn with_load_check(mut self, enabled: bool) -> Self {
        self.load_check = enabled;
        self
    }

    /// Run the checks for `mode` and render them.
    pub fn verify(
        &self,
        mode: EnvironmentMode,
        env: &Environment<'_>,
        ui: &mut dyn UserInterface,
    ) -> VerificationReport {
        ui.show_header(&format!("Verifying {} environment", mode.label()));

        let report = match mode {
            EnvironmentMode::Development => self.verify_development(env),
            EnvironmentMode::Registry => self.verify_registry(env),
        };

        ui.show_report("Verification", &report.rows());
        if report.all_passed() {
            ui.success(&format!("Environment is in {} mode", mode.label()));
        } else {
            let failed = report.failures().count();
            ui.error(&format!(
                "{failed} verification check(s) failed for {} mode",
                mode.label()
            ));
            ui.show_hint("Re-run `sindbad-env setup` after resolving the warnings above");
        }
        report
    }

    fn manifest(
        &self,
        env: &Environment<'_>,
        report: &mut VerificationReport,
    ) -> Option<ManifestText> {
        let path = env.active().manifest_file();
        match ManifestText::read(&path) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                tracing::debug!("could not read {}: {e}", path.display());
                report.fail("manifest", format!("could not read {}", path.display()));
                None
            }
        }
    }
}
