//! Environment mode management.
//!
//! [`ModeManager`] drives one of two flows against the
//! [`DependencyRegistry`](crate::registry::DependencyRegistry):
//!
//! - the development flow ([`develop`]) clones or updates every checkout,
//!   registers each as a development dependency, and wires the nested
//!   dependencies into the distinguished dependency's own environment
//! - the registry flow ([`release`]) removes every development
//!   registration and adds the distinguished dependency from the registry
//!
//! Both flows isolate per-dependency failures: each one is recorded in the
//! returned [`FlowReport`] and processing moves on to the next dependency.

pub mod develop;
pub mod release;
pub mod report;

pub use report::{FlowAction, FlowEntry, FlowReport};

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::Settings;
use crate::error::SetupError;
use crate::pkg::Environment;
use crate::registry::{DependencyRegistry, DependencySpec};
use crate::ui::{StatusKind, UserInterface};
use crate::vcs::VersionControl;

/// Which way dependencies are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnvironmentMode {
    /// Dependencies resolve from local git checkouts.
    Development,
    /// Dependencies resolve from the package registry.
    #[default]
    Registry,
}

impl EnvironmentMode {
    /// Resolve the mode from an optional selector; absent means `Registry`.
    pub fn resolve(selector: Option<&str>) -> crate::error::Result<Self> {
        match selector {
            None => Ok(Self::default()),
            Some(value) => value.parse(),
        }
    }

    /// Selector value as written in the settings file.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "dev",
            Self::Registry => "run",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Registry => "registry",
        }
    }
}

impl FromStr for EnvironmentMode {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dev" | "develop" | "development" => Ok(Self::Development),
            "run" | "registry" | "release" => Ok(Self::Registry),
            _ => Err(SetupError::UnknownMode {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for EnvironmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drives the development and registry flows.
pub struct ModeManager<'a> {
    registry: &'a DependencyRegistry,
    settings: &'a Settings,
    project_root: &'a Path,
    vcs: &'a dyn VersionControl,
}

impl<'a> ModeManager<'a> {
    /// Create a manager for the project at `project_root`.
    pub fn new(
        registry: &'a DependencyRegistry,
        settings: &'a Settings,
        project_root: &'a Path,
        vcs: &'a dyn VersionControl,
    ) -> Self {
        Self {
            registry,
            settings,
            project_root,
            vcs,
        }
    }

    /// Resolve and materialize the active project's full dependency graph.
    ///
    /// A failure is recorded but never raised; verification is expected to
    /// reveal the resulting inconsistency.
    pub fn instantiate(
        &self,
        env: &Environment<'_>,
        ui: &mut dyn UserInterface,
        report: &mut FlowReport,
    ) {
        ui.show_header("Instantiating project");
        let project = env.active().root().display().to_string();
        let mut spinner = ui.start_spinner("Resolving dependency graph...");
        match env.instantiate() {
            Ok(()) => {
                spinner.finish_success("Project instantiated");
                report.record(
                    &project,
                    FlowAction::Instantiate,
                    StatusKind::Success,
                    "dependency graph resolved",
                );
            }
            Err(e) => {
                spinner.finish_error(&format!("Instantiate failed: {}", e.summary()));
                tracing::warn!("instantiate failed: {e}");
                report.record(
                    &project,
                    FlowAction::Instantiate,
                    StatusKind::Failed,
                    e.summary(),
                );
            }
        }
    }

    fn checkout(&self, spec: &DependencySpec) -> PathBuf {
        self.registry.checkout_path(spec, self.project_root)
    }
}

/// Absolute form of an existing path, falling back to the path itself.
pub(crate) fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkg::{MockPackageManager, PkgCall};
    use crate::ui::MockUI;
    use crate::vcs::MockVcs;
    use tempfile::TempDir;

    #[test]
    fn resolve_defaults_to_registry() {
        assert_eq!(
            EnvironmentMode::resolve(None).unwrap(),
            EnvironmentMode::Registry
        );
    }

    #[test]
    fn parses_selectors_and_aliases() {
        assert_eq!(
            "dev".parse::<EnvironmentMode>().unwrap(),
            EnvironmentMode::Development
        );
        assert_eq!(
            " Development ".parse::<EnvironmentMode>().unwrap(),
            EnvironmentMode::Development
        );
        assert_eq!(
            "RUN".parse::<EnvironmentMode>().unwrap(),
            EnvironmentMode::Registry
        );
        assert_eq!(
            "registry".parse::<EnvironmentMode>().unwrap(),
            EnvironmentMode::Registry
        );
    }

    #[test]
    fn unknown_selector_is_error() {
        let err = EnvironmentMode::resolve(Some("staging")).unwrap_err();
        assert!(matches!(err, SetupError::UnknownMode { value } if value == "staging"));
    }

    #[test]
    fn display_uses_selector_value() {
        assert_eq!(EnvironmentMode::Development.to_string(), "dev");
        assert_eq!(EnvironmentMode::Registry.label(), "registry");
    }

    #[test]
    fn instantiate_failure_is_recorded_not_raised() {
        let temp = TempDir::new().unwrap();
        let registry = DependencyRegistry::builtin();
        let settings = Settings::default();
        let vcs = MockVcs::new();
        let mut pm = MockPackageManager::new();
        pm.fail_instantiate();
        let env = Environment::open(&pm, temp.path()).unwrap();
        let mut ui = MockUI::new();
        let mut report = FlowReport::new();

        ModeManager::new(&registry, &settings, temp.path(), &vcs).instantiate(
            &env,
            &mut ui,
            &mut report,
        );

        assert!(report.has_failures());
        assert!(pm
            .calls()
            .iter()
            .any(|c| matches!(c, PkgCall::Instantiate { .. })));
    }
}
