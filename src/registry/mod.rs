//! The managed dependency registry.
//!
//! [`DependencyRegistry`] is the single source of truth for which
//! dependencies the tool manages. Both the development flow and the
//! registry flow walk the same ordered list; settings can only change where
//! a dependency's source lives.

pub mod dependency;

pub use dependency::DependencySpec;

use std::path::{Path, PathBuf};

use crate::config::Settings;

/// Ordered set of managed dependencies plus the nested wiring for the
/// distinguished one.
#[derive(Debug, Clone)]
pub struct DependencyRegistry {
    dependencies: Vec<DependencySpec>,
    distinguished: String,
    nested: Vec<String>,
    internal_components: Vec<PathBuf>,
}

impl DependencyRegistry {
    /// The compiled-in SINDBAD dependency set.
    ///
    /// `Sindbad` is the distinguished dependency: its own environment also
    /// develops the three utility libraries and its `lib/SindbadTEM`
    /// sub-package.
    pub fn builtin() -> Self {
        Self {
            dependencies: vec![
                DependencySpec::new(
                    "Sindbad",
                    "dev/Sindbad",
                    Some("https://github.com/LandEcosystems/Sindbad.jl.git"),
                ),
                DependencySpec::new(
                    "ErrorMetrics",
                    "dev/ErrorMetrics",
                    Some("https://github.com/LandEcosystems/ErrorMetrics.jl.git"),
                ),
                DependencySpec::new(
                    "TimeSamplers",
                    "dev/TimeSamplers",
                    Some("https://github.com/LandEcosystems/TimeSamplers.jl.git"),
                ),
                DependencySpec::new(
                    "OmniTools",
                    "dev/OmniTools",
                    Some("https://github.com/LandEcosystems/OmniTools.jl.git"),
                ),
            ],
            distinguished: "Sindbad".to_string(),
            nested: vec![
                "ErrorMetrics".to_string(),
                "TimeSamplers".to_string(),
                "OmniTools".to_string(),
            ],
            internal_components: vec![PathBuf::from("lib").join("SindbadTEM")],
        }
    }

    /// Build a custom registry.
    ///
    /// `distinguished` and every name in `nested` must name an entry of
    /// `dependencies`; unknown names are dropped.
    pub fn new(
        dependencies: Vec<DependencySpec>,
        distinguished: &str,
        nested: &[&str],
        internal_components: &[&str],
    ) -> Self {
        let nested = nested
            .iter()
            .copied()
            .filter(|name| *name != distinguished && dependencies.iter().any(|d| d.name == *name))
            .map(String::from)
            .collect();

        Self {
            distinguished: distinguished.to_string(),
            nested,
            internal_components: internal_components.iter().map(PathBuf::from).collect(),
            dependencies,
        }
    }

    /// All managed dependencies in processing order.
    pub fn list(&self) -> &[DependencySpec] {
        &self.dependencies
    }

    /// Names of all managed dependencies in processing order.
    pub fn names(&self) -> Vec<&str> {
        self.dependencies.iter().map(|d| d.name.as_str()).collect()
    }

    /// Look up a dependency by name.
    pub fn get(&self, name: &str) -> Option<&DependencySpec> {
        self.dependencies.iter().find(|d| d.name == name)
    }

    /// Check if a name is managed.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The distinguished dependency.
    pub fn distinguished(&self) -> Option<&DependencySpec> {
        self.get(&self.distinguished)
    }

    /// Dependencies developed inside the distinguished dependency's own
    /// environment, in order.
    pub fn nested(&self) -> impl Iterator<Item = &DependencySpec> {
        self.nested.iter().filter_map(|name| self.get(name))
    }

    /// Sub-package paths, relative to the distinguished checkout.
    pub fn internal_components(&self) -> &[PathBuf] {
        &self.internal_components
    }

    /// Resolve where a dependency's source comes from: the settings
    /// override first, then the compiled-in default.
    pub fn resolve_source<'s>(
        &'s self,
        spec: &'s DependencySpec,
        settings: &'s Settings,
    ) -> Option<&'s str> {
        settings
            .source_override(&spec.name)
            .or(spec.default_source.as_deref())
    }

    /// Checkout path of a dependency under the given project root.
    pub fn checkout_path(&self, spec: &DependencySpec, project_root: &Path) -> PathBuf {
        project_root.join(&spec.local_path)
    }
}

impl Default for DependencyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
