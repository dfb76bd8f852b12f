//! Package-manager collaborator.
//!
//! The package manager owns dependency resolution; this tool only drives it
//! through the primitives on [`PackageManager`]. Every primitive takes an
//! explicit [`ProjectContext`] naming the project it acts on, and
//! [`Environment`] tracks which context is currently active.

pub mod environment;
pub mod julia;
pub mod mock;

pub use environment::{Environment, ScopedContext};
pub use julia::JuliaPkg;
pub use mock::{MockPackageManager, PkgCall};

use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError};

/// Handle to a project environment the package manager can act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    root: PathBuf,
}

impl ProjectContext {
    /// Wrap a project directory without touching the filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open an existing project directory, resolving it to an absolute path.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(SetupError::PackageManager {
                operation: format!("activate {}", path.display()),
                message: "not a directory".to_string(),
            });
        }
        Ok(Self::new(std::fs::canonicalize(path)?))
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The project descriptor, preferring `JuliaProject.toml` when present.
    pub fn project_file(&self) -> PathBuf {
        let preferred = self.root.join("JuliaProject.toml");
        if preferred.is_file() {
            preferred
        } else {
            self.root.join("Project.toml")
        }
    }

    /// The manifest artifact, preferring `JuliaManifest.toml` when present.
    pub fn manifest_file(&self) -> PathBuf {
        let preferred = self.root.join("JuliaManifest.toml");
        if preferred.is_file() {
            preferred
        } else {
            self.root.join("Manifest.toml")
        }
    }
}

/// Result of removing a package from a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The package was registered and has been removed.
    Removed,
    /// The package was not registered in the project.
    NotRegistered,
}

/// Package-manager primitives.
pub trait PackageManager {
    /// Resolve `path` into a project handle.
    fn activate(&self, path: &Path) -> Result<ProjectContext> {
        ProjectContext::open(path)
    }

    /// Register the checkout at `path` as a development dependency.
    fn develop(&self, ctx: &ProjectContext, path: &Path) -> Result<()>;

    /// Add `name` from the package registry.
    fn add(&self, ctx: &ProjectContext, name: &str) -> Result<()>;

    /// Remove `name` from the project.
    fn remove(&self, ctx: &ProjectContext, name: &str) -> Result<RemoveOutcome>;

    /// Resolve and materialize the full dependency graph.
    fn instantiate(&self, ctx: &ProjectContext) -> Result<()>;

    /// Load `name` and report the source path it resolved to.
    ///
    /// `Ok(None)` means the package loaded but has no source path.
    fn locate(&self, ctx: &ProjectContext, name: &str) -> Result<Option<PathBuf>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_requires_directory() {
        let temp = TempDir::new().unwrap();
        let err = ProjectContext::open(&temp.path().join("missing")).unwrap_err();
        assert!(matches!(err, SetupError::PackageManager { .. }));
    }

    #[test]
    fn open_canonicalizes() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("proj")).unwrap();
        let ctx = ProjectContext::open(&temp.path().join("proj/../proj")).unwrap();
        assert_eq!(
            ctx.root(),
            std::fs::canonicalize(temp.path().join("proj")).unwrap()
        );
    }

    #[test]
    fn manifest_prefers_julia_prefixed_file() {
        let temp = TempDir::new().unwrap();
        let ctx = ProjectContext::new(temp.path());
        assert_eq!(ctx.manifest_file(), temp.path().join("Manifest.toml"));

        std::fs::write(temp.path().join("JuliaManifest.toml"), "").unwrap();
        assert_eq!(ctx.manifest_file(), temp.path().join("JuliaManifest.toml"));
    }

    #[test]
    fn project_file_defaults_to_project_toml() {
        let temp = TempDir::new().unwrap();
        let ctx = ProjectContext::new(temp.path());
        assert_eq!(ctx.project_file(), temp.path().join("Project.toml"));
    }
}
