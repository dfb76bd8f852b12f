//! Registry-mode checks.

use crate::modes::{absolute, EnvironmentMode};
use crate::pkg::Environment;

use super::{is_development_path, is_registry_path, VerificationReport, Verifier};

impl Verifier<'_> {
    pub(super) fn verify_registry(&self, env: &Environment<'_>) -> VerificationReport {
        let mut report = VerificationReport::new(EnvironmentMode::Registry);
        let Some(parent) = self.registry.distinguished() else {
            return report;
        };

        if let Some(manifest) = self.manifest(env, &mut report) {
            report.check(
                manifest.mentions(&parent.name),
                format!("{} manifest", parent.name),
                "entry present",
                "no manifest entry",
            );
            report.check(
                !manifest.has_local_path(&parent.name),
                format!("{} source", parent.name),
                "resolved from registry",
                "still resolved from a local path",
            );
        }

        if self.load_check {
            let name = format!("{} load", parent.name);
            let checkout = absolute(&self.registry.checkout_path(parent, self.project_root));
            match env.locate(&parent.name) {
                Ok(Some(resolved)) => report.check(
                    is_registry_path(&resolved) && !is_development_path(&resolved, &checkout),
                    name,
                    resolved.display().to_string(),
                    format!("loads from {}", resolved.display()),
                ),
                Ok(None) => report.info(name, "loaded without a source path"),
                Err(e) => {
                    tracing::debug!("locate {} failed: {e}", parent.name);
                    report.info(name, "not loadable yet; restart Julia to pick it up")
                }
            }
        }

        report
    }
}
