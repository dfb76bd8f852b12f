//! Development-mode checks.

use crate::modes::{absolute, EnvironmentMode};
use crate::pkg::{Environment, ProjectContext};

use super::{is_development_path, VerificationReport, Verifier};

impl Verifier<'_> {
    pub(super) fn verify_development(&self, env: &Environment<'_>) -> VerificationReport {
        let mut report = VerificationReport::new(EnvironmentMode::Development);

        if let Some(manifest) = self.manifest(env, &mut report) {
            for spec in self.registry.list() {
                report.check(
                    manifest.has_local_path(&spec.name),
                    format!("{} manifest", spec.name),
                    "resolved from local path",
                    "no local-path entry in manifest",
                );
            }
        }

        for spec in self.registry.list() {
            let path = self.registry.checkout_path(spec, self.project_root);
            report.check(
                path.is_dir(),
                format!("{} checkout", spec.name),
                spec.local_path.display().to_string(),
                format!("{} is missing", spec.local_path.display()),
            );
        }

        if let Some(parent) = self.registry.distinguished() {
            let descriptor =
                ProjectContext::new(self.registry.checkout_path(parent, self.project_root))
                    .project_file();
            report.check(
                descriptor.is_file(),
                format!("{} project file", parent.name),
                format!("{} present", descriptor.display()),
                format!("{} not found", descriptor.display()),
            );
        }

        if self.load_check {
            for spec in self.registry.list() {
                let name = format!("{} load", spec.name);
                let checkout = absolute(&self.registry.checkout_path(spec, self.project_root));
                match env.locate(&spec.name) {
                    Ok(Some(resolved)) => report.check(
                        is_development_path(&resolved, &checkout),
                        name,
                        resolved.display().to_string(),
                        format!("loads from {}", resolved.display()),
                    ),
                    Ok(None) => report.info(name, "loaded without a source path"),
                    Err(e) => {
                        tracing::debug!("locate {} failed: {e}", spec.name);
                        report.info(name, "not loadable yet; restart Julia to pick it up")
                    }
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkg::MockPackageManager;
    use crate::registry::DependencyRegistry;
    use crate::verify::CheckOutcome;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn developed_manifest(root: &Path, registry: &DependencyRegistry) -> String {
        registry
            .list()
            .iter()
            .map(|spec| {
                format!(
                    "[[deps.{}]]\npath = {:?}\nuuid = \"0\"\n\n",
                    spec.name,
                    root.join(&spec.local_path)
                )
            })
            .collect()
    }

    fn populated(temp: &TempDir, registry: &DependencyRegistry) -> PathBuf {
        let root = fs::canonicalize(temp.path()).unwrap();
        for spec in registry.list() {
            fs::create_dir_all(root.join(&spec.local_path)).unwrap();
        }
        fs::write(root.join("dev/Sindbad/Project.toml"), "name = \"Sindbad\"\n").unwrap();
        fs::write(root.join("Manifest.toml"), developed_manifest(&root, registry)).unwrap();
        root
    }

    #[test]
    fn complete_development_environment_passes() {
        let temp = TempDir::new().unwrap();
        let registry = DependencyRegistry::builtin();
        let root = populated(&temp, &registry);
        let pm = MockPackageManager::new();
        let env = Environment::open(&pm, &root).unwrap();

        let report = Verifier::new(&registry, &root).verify_development(&env);

        assert!(report.all_passed(), "{:?}", report.checks);
        assert_eq!(
            report.find("Sindbad load").unwrap().outcome,
            CheckOutcome::Info
        );
    }

    #[test]
    fn missing_checkout_fails_regardless_of_manifest() {
        let temp = TempDir::new().unwrap();
        let registry = DependencyRegistry::builtin();
        let root = populated(&temp, &registry);
        fs::remove_dir_all(root.join("dev/TimeSamplers")).unwrap();
        let pm = MockPackageManager::new();
        let env = Environment::open(&pm, &root).unwrap();

        let report = Verifier::new(&registry, &root)
            .with_load_check(false)
            .verify_development(&env);

        assert!(!report.all_passed());
        assert_eq!(
            report.find("TimeSamplers checkout").unwrap().outcome,
            CheckOutcome::Fail
        );
        assert_eq!(
            report.find("TimeSamplers manifest").unwrap().outcome,
            CheckOutcome::Pass
        );
    }

    #[test]
    fn registry_entry_fails_manifest_check() {
        let temp = TempDir::new().unwrap();
        let registry = DependencyRegistry::builtin();
        let root = populated(&temp, &registry);
        fs::write(
            root.join("Manifest.toml"),
            "[[deps.Sindbad]]\nversion = \"0.5.0\"\n",
        )
        .unwrap();
        let pm = MockPackageManager::new();
        let env = Environment::open(&pm, &root).unwrap();

        let report = Verifier::new(&registry, &root)
            .with_load_check(false)
            .verify_development(&env);

        assert_eq!(report.find("Sindbad manifest").unwrap().outcome, CheckOutcome::Fail);
        assert_eq!(report.failures().count(), 4);
    }

    #[test]
    fn missing_manifest_fails() {
        let temp = TempDir::new().unwrap();
        let registry = DependencyRegistry::builtin();
        let root = populated(&temp, &registry);
        fs::remove_file(root.join("Manifest.toml")).unwrap();
        let pm = MockPackageManager::new();
        let env = Environment::open(&pm, &root).unwrap();

        let report = Verifier::new(&registry, &root)
            .with_load_check(false)
            .verify_development(&env);

        assert_eq!(report.find("manifest").unwrap().outcome, CheckOutcome::Fail);
    }

    #[test]
    fn load_check_flags_registry_resolution() {
        let temp = TempDir::new().unwrap();
        let registry = DependencyRegistry::builtin();
        let root = populated(&temp, &registry);
        let mut pm = MockPackageManager::new();
        pm.set_location("ErrorMetrics", root.join("dev/ErrorMetrics/src/ErrorMetrics.jl"));
        pm.set_location(
            "Sindbad",
            "/home/me/.julia/packages/Sindbad/AbCd1/src/Sindbad.jl",
        );
        let env = Environment::open(&pm, &root).unwrap();

        let report = Verifier::new(&registry, &root).verify_development(&env);

        assert_eq!(
            report.find("ErrorMetrics load").unwrap().outcome,
            CheckOutcome::Pass
        );
        assert_eq!(report.find("Sindbad load").unwrap().outcome, CheckOutcome::Fail);
        assert_eq!(
            report.find("OmniTools load").unwrap().outcome,
            CheckOutcome::Info
        );
    }

    #[test]
    fn load_check_flags_store_under_dev_directory() {
        let temp = TempDir::new().unwrap();
        let registry = DependencyRegistry::builtin();
        let root = populated(&temp, &registry);
        let mut pm = MockPackageManager::new();
        pm.set_location(
            "TimeSamplers",
            "/home/dev/.julia/packages/TimeSamplers/Qx9/src/TimeSamplers.jl",
        );
        let env = Environment::open(&pm, &root).unwrap();

        let report = Verifier::new(&registry, &root).verify_development(&env);

        assert_eq!(
            report.find("TimeSamplers load").unwrap().outcome,
            CheckOutcome::Fail
        );
    }
}
