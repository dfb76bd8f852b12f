//! Development flow.
//!
//! Three passes over the registry, in order:
//!
//! 1. materialize: clone missing checkouts, offer to pull clean ones, leave
//!    dirty ones alone
//! 2. register: develop every checkout that now exists into the active
//!    project
//! 3. nested wiring: inside the distinguished dependency's own environment,
//!    develop its sibling checkouts and internal sub-packages
//!
//! Registration waits for all checkouts so that no `develop` call can see a
//! sibling path that has not been cloned yet.

use std::fs;
use std::path::Path;

use crate::pkg::Environment;
use crate::registry::DependencySpec;
use crate::ui::{Prompt, StatusKind, UserInterface};
use crate::vcs::is_clean;

use super::{absolute, FlowAction, FlowReport, ModeManager};

impl ModeManager<'_> {
    /// Run the development flow against `env`.
    pub fn develop(&self, env: &mut Environment<'_>, ui: &mut dyn UserInterface) -> FlowReport {
        let mut report = FlowReport::new();

        ui.show_header("Preparing development checkouts");
        for spec in self.registry.list() {
            self.materialize(spec, ui, &mut report);
        }

        ui.show_header("Registering development dependencies");
        for spec in self.registry.list() {
            self.register(spec, env, ui, &mut report);
        }

        self.wire_nested(env, ui, &mut report);

        report
    }

    fn materialize(
        &self,
        spec: &DependencySpec,
        ui: &mut dyn UserInterface,
        report: &mut FlowReport,
    ) {
        let path = self.checkout(spec);

        if path.is_dir() {
            self.refresh(spec, &path, ui, report);
            return;
        }

        match self.registry.resolve_source(spec, self.settings) {
            Some(url) => self.clone_into(spec, url, &path, ui, report),
            None => {
                ui.warning(&format!(
                    "{}: no checkout at {} and no git_url configured",
                    spec.name,
                    path.display()
                ));
                report.record(
                    &spec.name,
                    FlowAction::Configure,
                    StatusKind::Warning,
                    "unconfigured",
                );
            }
        }
    }

    fn refresh(
        &self,
        spec: &DependencySpec,
        path: &Path,
        ui: &mut dyn UserInterface,
        report: &mut FlowReport,
    ) {
        let status = match self.vcs.status(path) {
            Ok(status) => status,
            Err(e) => {
                ui.error(&format!("{}: could not read git status: {}", spec.name, e.summary()));
                report.record(&spec.name, FlowAction::Status, StatusKind::Failed, e.summary());
                return;
            }
        };

        if !is_clean(&status) {
            ui.warning(&format!(
                "{} has uncommitted changes; leaving {} untouched",
                spec.name,
                path.display()
            ));
            report.record(
                &spec.name,
                FlowAction::Pull,
                StatusKind::Skipped,
                "uncommitted changes",
            );
            return;
        }

        let prompt = Prompt::confirm(
            format!("pull_{}", spec.name.to_lowercase()),
            format!("{} is already cloned. Pull latest changes?", spec.name),
        );
        let confirmed = match ui.confirm(&prompt) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::debug!("No confirmation for {}: {e}", spec.name);
                false
            }
        };

        if !confirmed {
            ui.message(&format!("Keeping current checkout of {}", spec.name));
            report.record(
                &spec.name,
                FlowAction::Pull,
                StatusKind::Skipped,
                "kept current checkout",
            );
            return;
        }

        let mut spinner = ui.start_spinner(&format!("Pulling {}...", spec.name));
        match self.vcs.pull(path) {
            Ok(()) => {
                spinner.finish_success(&format!("{} updated", spec.name));
                report.record(&spec.name, FlowAction::Pull, StatusKind::Success, "updated");
            }
            Err(e) => {
                spinner.finish_error(&format!("{}: pull failed", spec.name));
                report.record(&spec.name, FlowAction::Pull, StatusKind::Failed, e.summary());
            }
        }
    }

    fn clone_into(
        &self,
        spec: &DependencySpec,
        url: &str,
        path: &Path,
        ui: &mut dyn UserInterface,
        report: &mut FlowReport,
    ) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                ui.error(&format!(
                    "{}: could not create {}: {e}",
                    spec.name,
                    parent.display()
                ));
                report.record(&spec.name, FlowAction::Clone, StatusKind::Failed, e.to_string());
                return;
            }
        }

        let mut spinner = ui.start_spinner(&format!("Cloning {} from {}...", spec.name, url));
        match self.vcs.clone_repo(url, path) {
            Ok(()) => {
                spinner.finish_success(&format!("{} cloned", spec.name));
                report.record(
                    &spec.name,
                    FlowAction::Clone,
                    StatusKind::Success,
                    format!("cloned into {}", spec.local_path.display()),
                );
            }
            Err(e) => {
                spinner.finish_error(&format!("{}: clone failed", spec.name));
                tracing::warn!("clone of {} failed: {e}", spec.name);
                report.record(&spec.name, FlowAction::Clone, StatusKind::Failed, e.summary());
            }
        }
    }

    fn register(
        &self,
        spec: &DependencySpec,
        env: &Environment<'_>,
        ui: &mut dyn UserInterface,
        report: &mut FlowReport,
    ) {
        let path = self.checkout(spec);
        if !path.is_dir() {
            report.record(
                &spec.name,
                FlowAction::Develop,
                StatusKind::Skipped,
                "no checkout",
            );
            return;
        }

        let path = absolute(&path);
        match env.develop(&path) {
            Ok(()) => {
                ui.success(&format!("{} registered for development", spec.name));
                report.record(
                    &spec.name,
                    FlowAction::Develop,
                    StatusKind::Success,
                    path.display().to_string(),
                );
            }
            Err(e) => {
                ui.error(&format!("{}: develop failed: {}", spec.name, e.summary()));
                report.record(&spec.name, FlowAction::Develop, StatusKind::Failed, e.summary());
            }
        }
    }

    fn wire_nested(
        &self,
        env: &mut Environment<'_>,
        ui: &mut dyn UserInterface,
        report: &mut FlowReport,
    ) {
        let Some(parent) = self.registry.distinguished() else {
            return;
        };
        let parent_path = self.checkout(parent);
        if !parent_path.is_dir() {
            report.record(
                &parent.name,
                FlowAction::Activate,
                StatusKind::Skipped,
                "no checkout; nested wiring skipped",
            );
            return;
        }
        let parent_path = absolute(&parent_path);

        ui.show_header(&format!("Wiring {} environment", parent.name));

        let scope = match env.scoped(&parent_path) {
            Ok(scope) => scope,
            Err(e) => {
                ui.error(&format!(
                    "Could not activate {} environment: {}",
                    parent.name,
                    e.summary()
                ));
                report.record(&parent.name, FlowAction::Activate, StatusKind::Failed, e.summary());
                return;
            }
        };

        for spec in self.registry.nested() {
            let subject = format!("{}/{}", parent.name, spec.name);
            let path = self.checkout(spec);
            if !path.is_dir() {
                report.record(
                    &subject,
                    FlowAction::NestedDevelop,
                    StatusKind::Skipped,
                    "no checkout",
                );
                continue;
            }
            develop_nested(&scope, &subject, &absolute(&path), ui, report);
        }

        for component in self.registry.internal_components() {
            let subject = format!("{}/{}", parent.name, component.display());
            develop_nested(&scope, &subject, &parent_path.join(component), ui, report);
        }

        drop(scope);
        let restored = env.active().root().display().to_string();
        ui.message(&format!("Restored active project {restored}"));
        report.record(
            &restored,
            FlowAction::Activate,
            StatusKind::Success,
            "restored active project",
        );
    }
}

fn develop_nested(
    env: &Environment<'_>,
    subject: &str,
    path: &Path,
    ui: &mut dyn UserInterface,
    report: &mut FlowReport,
) {
    match env.develop(path) {
        Ok(()) => {
            ui.success(&format!("{subject} registered"));
            report.record(
                subject,
                FlowAction::NestedDevelop,
                StatusKind::Success,
                path.display().to_string(),
            );
        }
        Err(e) => {
            ui.error(&format!("{subject}: develop failed: {}", e.summary()));
            report.record(subject, FlowAction::NestedDevelop, StatusKind::Failed, e.summary());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_settings, Settings};
    use crate::pkg::MockPackageManager;
    use crate::registry::DependencyRegistry;
    use crate::ui::MockUI;
    use crate::vcs::{MockVcs, VcsCall};
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        temp: TempDir,
        registry: DependencyRegistry,
        settings: Settings,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                temp: TempDir::new().unwrap(),
                registry: DependencyRegistry::builtin(),
                settings: Settings::default(),
            }
        }

        fn root(&self) -> PathBuf {
            std::fs::canonicalize(self.temp.path()).unwrap()
        }

        fn checkout(&self, name: &str) -> PathBuf {
            let spec = self.registry.get(name).unwrap();
            self.registry.checkout_path(spec, &self.root())
        }

        fn precreate(&self, name: &str) {
            std::fs::create_dir_all(self.checkout(name)).unwrap();
        }

        fn run(&self, vcs: &MockVcs, pm: &MockPackageManager, ui: &mut MockUI) -> FlowReport {
            let root = self.root();
            let mut env = Environment::open(pm, &root).unwrap();
            let manager = ModeManager::new(&self.registry, &self.settings, &root, vcs);
            let report = manager.develop(&mut env, ui);
            assert_eq!(env.active().root(), root.as_path());
            report
        }
    }

    #[test]
    fn fresh_project_clones_all_in_order() {
        let fx = Fixture::new();
        let vcs = MockVcs::new();
        let pm = MockPackageManager::new();
        let mut ui = MockUI::new();

        let report = fx.run(&vcs, &pm, &mut ui);

        let expected: Vec<String> = fx
            .registry
            .list()
            .iter()
            .map(|d| d.default_source.clone().unwrap())
            .collect();
        assert_eq!(vcs.cloned_urls(), expected);
        assert!(ui.prompts_shown().is_empty());
        assert_eq!(
            report.find("Sindbad", FlowAction::Clone).unwrap().status,
            StatusKind::Success
        );
    }

    #[test]
    fn parent_directories_exist_before_clone() {
        let fx = Fixture::new();
        let vcs = MockVcs::new();
        let pm = MockPackageManager::new();
        let mut ui = MockUI::new();

        fx.run(&vcs, &pm, &mut ui);

        for call in vcs.calls() {
            if let VcsCall::Clone { parent_existed, path, .. } = call {
                assert!(parent_existed, "parent of {} missing at clone time", path.display());
            }
        }
    }

    #[test]
    fn clean_existing_checkout_prompts_and_never_clones() {
        let fx = Fixture::new();
        fx.precreate("ErrorMetrics");
        let vcs = MockVcs::new();
        let pm = MockPackageManager::new();
        let mut ui = MockUI::new();
        ui.set_prompt_response("pull_errormetrics", "yes");

        let report = fx.run(&vcs, &pm, &mut ui);

        assert!(ui.prompts_shown().contains(&"pull_errormetrics".to_string()));
        assert_eq!(vcs.pulled_paths(), vec![fx.checkout("ErrorMetrics")]);
        assert!(!vcs
            .cloned_urls()
            .iter()
            .any(|u| u.contains("ErrorMetrics")));
        assert_eq!(
            report.find("ErrorMetrics", FlowAction::Pull).unwrap().status,
            StatusKind::Success
        );
    }

    #[test]
    fn declined_pull_leaves_checkout_untouched() {
        let fx = Fixture::new();
        fx.precreate("OmniTools");
        let vcs = MockVcs::new();
        let pm = MockPackageManager::new();
        let mut ui = MockUI::new();
        ui.set_prompt_response("pull_omnitools", "no");

        let report = fx.run(&vcs, &pm, &mut ui);

        assert!(vcs.pulled_paths().is_empty());
        let entry = report.find("OmniTools", FlowAction::Pull).unwrap();
        assert_eq!(entry.status, StatusKind::Skipped);
        assert!(!report.has_failures());
    }

    #[test]
    fn missing_confirmation_is_a_no_op() {
        let fx = Fixture::new();
        fx.precreate("OmniTools");
        let vcs = MockVcs::new();
        let pm = MockPackageManager::new();
        let mut ui = MockUI::new();
        ui.set_unanswerable(true);

        let report = fx.run(&vcs, &pm, &mut ui);

        assert!(vcs.pulled_paths().is_empty());
        assert_eq!(
            report.find("OmniTools", FlowAction::Pull).unwrap().status,
            StatusKind::Skipped
        );
    }

    #[test]
    fn dirty_checkout_is_skipped_without_prompt() {
        let fx = Fixture::new();
        fx.precreate("TimeSamplers");
        let mut vcs = MockVcs::new();
        vcs.set_status(fx.checkout("TimeSamplers"), " M src/TimeSamplers.jl\n");
        let pm = MockPackageManager::new();
        let mut ui = MockUI::new();

        let report = fx.run(&vcs, &pm, &mut ui);

        assert!(!ui.prompts_shown().contains(&"pull_timesamplers".to_string()));
        assert!(vcs.pulled_paths().is_empty());
        assert!(ui.has_warning("uncommitted changes"));
        assert_eq!(
            report.find("TimeSamplers", FlowAction::Pull).unwrap().detail,
            "uncommitted changes"
        );
        assert!(pm.developed_in(&fx.root()).contains(&fx.checkout("TimeSamplers")));
    }

    #[test]
    fn clone_failure_does_not_stop_later_dependencies() {
        let fx = Fixture::new();
        let mut vcs = MockVcs::new();
        let bad = fx
            .registry
            .get("ErrorMetrics")
            .unwrap()
            .default_source
            .clone()
            .unwrap();
        vcs.fail_clone(&bad);
        let pm = MockPackageManager::new();
        let mut ui = MockUI::new();

        let report = fx.run(&vcs, &pm, &mut ui);

        assert_eq!(vcs.cloned_urls().len(), 4);
        assert_eq!(
            report.find("ErrorMetrics", FlowAction::Clone).unwrap().status,
            StatusKind::Failed
        );
        assert_eq!(
            report.find("ErrorMetrics", FlowAction::Develop).unwrap().status,
            StatusKind::Skipped
        );
        let developed = pm.developed_in(&fx.root());
        assert!(developed.contains(&fx.checkout("OmniTools")));
        assert!(!developed.contains(&fx.checkout("ErrorMetrics")));
        assert_eq!(
            report
                .find("Sindbad/ErrorMetrics", FlowAction::NestedDevelop)
                .unwrap()
                .status,
            StatusKind::Skipped
        );
    }

    #[test]
    fn pull_failure_is_recorded_and_registration_continues() {
        let fx = Fixture::new();
        fx.precreate("ErrorMetrics");
        let mut vcs = MockVcs::new();
        vcs.fail_pull(fx.checkout("ErrorMetrics"));
        let pm = MockPackageManager::new();
        let mut ui = MockUI::new();
        ui.set_prompt_response("pull_errormetrics", "y");

        let report = fx.run(&vcs, &pm, &mut ui);

        assert_eq!(
            report.find("ErrorMetrics", FlowAction::Pull).unwrap().status,
            StatusKind::Failed
        );
        assert!(pm.developed_in(&fx.root()).contains(&fx.checkout("ErrorMetrics")));
    }

    #[test]
    fn settings_override_changes_clone_url() {
        let mut fx = Fixture::new();
        fx.settings = parse_settings(
            "[OmniTools]\ngit_url = \"https://example.com/fork/OmniTools.jl.git\"\n",
            Path::new("settings.toml"),
        )
        .unwrap();
        let vcs = MockVcs::new();
        let pm = MockPackageManager::new();
        let mut ui = MockUI::new();

        fx.run(&vcs, &pm, &mut ui);

        assert_eq!(
            vcs.cloned_urls().last().unwrap(),
            "https://example.com/fork/OmniTools.jl.git"
        );
    }

    #[test]
    fn unconfigured_dependency_is_reported_and_skipped() {
        let temp = TempDir::new().unwrap();
        let root = std::fs::canonicalize(temp.path()).unwrap();
        let registry = DependencyRegistry::new(
            vec![
                DependencySpec::new("Core", "dev/Core", Some("https://x/Core.git")),
                DependencySpec::new("Orphan", "dev/Orphan", None),
            ],
            "Core",
            &["Orphan"],
            &[],
        );
        let settings = Settings::default();
        let vcs = MockVcs::new();
        let pm = MockPackageManager::new();
        let mut ui = MockUI::new();
        let mut env = Environment::open(&pm, &root).unwrap();

        let report =
            ModeManager::new(&registry, &settings, &root, &vcs).develop(&mut env, &mut ui);

        assert_eq!(vcs.cloned_urls(), vec!["https://x/Core.git".to_string()]);
        let entry = report.find("Orphan", FlowAction::Configure).unwrap();
        assert_eq!(entry.status, StatusKind::Warning);
        assert_eq!(entry.detail, "unconfigured");
    }

    #[test]
    fn nested_failure_still_restores_context() {
        let fx = Fixture::new();
        let mut vcs = MockVcs::new();
        let sindbad_url = fx
            .registry
            .get("Sindbad")
            .unwrap()
            .default_source
            .clone()
            .unwrap();
        vcs.set_clone_layout(&sindbad_url, &["Project.toml", "lib/SindbadTEM"]);
        let mut pm = MockPackageManager::new();
        pm.fail_develop(fx.checkout("TimeSamplers"));
        let mut ui = MockUI::new();

        // Fixture::run asserts the active project is the root afterwards.
        let report = fx.run(&vcs, &pm, &mut ui);

        let sindbad_root = fx.checkout("Sindbad");
        let nested = pm.developed_in(&sindbad_root);
        assert_eq!(nested.len(), 4);
        assert_eq!(
            report
                .find("Sindbad/TimeSamplers", FlowAction::NestedDevelop)
                .unwrap()
                .status,
            StatusKind::Failed
        );
        assert_eq!(
            report
                .find("Sindbad/OmniTools", FlowAction::NestedDevelop)
                .unwrap()
                .status,
            StatusKind::Success
        );
        assert!(report
            .entries()
            .iter()
            .any(|e| e.action == FlowAction::Activate && e.detail == "restored active project"));
    }

    #[test]
    fn missing_distinguished_checkout_skips_nested_wiring() {
        let fx = Fixture::new();
        let mut vcs = MockVcs::new();
        let sindbad_url = fx
            .registry
            .get("Sindbad")
            .unwrap()
            .default_source
            .clone()
            .unwrap();
        vcs.fail_clone(&sindbad_url);
        let pm = MockPackageManager::new();
        let mut ui = MockUI::new();

        let report = fx.run(&vcs, &pm, &mut ui);

        assert!(pm.developed_in(&fx.checkout("Sindbad")).is_empty());
        assert_eq!(
            report.find("Sindbad", FlowAction::Activate).unwrap().status,
            StatusKind::Skipped
        );
    }
}
