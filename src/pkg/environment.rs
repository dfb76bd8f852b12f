//! Active project tracking.
//!
//! [`Environment`] pairs a package manager with the project context its
//! operations apply to. [`Environment::scoped`] switches to another
//! project for the lifetime of the returned [`ScopedContext`]; dropping the
//! guard restores the previous context on every exit path, including early
//! returns and panics.

use std::ops::Deref;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::{PackageManager, ProjectContext, RemoveOutcome};

/// A package manager bound to the currently active project.
pub struct Environment<'a> {
    manager: &'a dyn PackageManager,
    active: ProjectContext,
}

impl<'a> Environment<'a> {
    /// Create an environment with `active` as the current project.
    pub fn new(manager: &'a dyn PackageManager, active: ProjectContext) -> Self {
        Self { manager, active }
    }

    /// Activate the project at `path` and bind it.
    pub fn open(manager: &'a dyn PackageManager, path: &Path) -> Result<Self> {
        let active = manager.activate(path)?;
        Ok(Self::new(manager, active))
    }

    /// The active project.
    pub fn active(&self) -> &ProjectContext {
        &self.active
    }

    /// Switch to the project at `path` until the guard is dropped.
    pub fn scoped(&mut self, path: &Path) -> Result<ScopedContext<'_, 'a>> {
        let next = self.manager.activate(path)?;
        tracing::debug!(
            "Switching active project {} -> {}",
            self.active.root().display(),
            next.root().display()
        );
        let previous = std::mem::replace(&mut self.active, next);
        Ok(ScopedContext {
            env: self,
            previous: Some(previous),
        })
    }

    /// Register a development checkout in the active project.
    pub fn develop(&self, path: &Path) -> Result<()> {
        self.manager.develop(&self.active, path)
    }

    /// Add a registry package to the active project.
    pub fn add(&self, name: &str) -> Result<()> {
        self.manager.add(&self.active, name)
    }

    /// Remove a package from the active project.
    pub fn remove(&self, name: &str) -> Result<RemoveOutcome> {
        self.manager.remove(&self.active, name)
    }

    /// Instantiate the active project.
    pub fn instantiate(&self) -> Result<()> {
        self.manager.instantiate(&self.active)
    }

    /// Locate a package's source from the active project.
    pub fn locate(&self, name: &str) -> Result<Option<PathBuf>> {
        self.manager.locate(&self.active, name)
    }
}

/// Guard returned by [`Environment::scoped`].
///
/// Dereferences to the environment so operations run against the scoped
/// project.
pub struct ScopedContext<'e, 'a> {
    env: &'e mut Environment<'a>,
    previous: Option<ProjectContext>,
}

impl<'a> Deref for ScopedContext<'_, 'a> {
    type Target = Environment<'a>;

    fn deref(&self) -> &Self::Target {
        self.env
    }
}

impl Drop for ScopedContext<'_, '_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            tracing::debug!("Restoring active project {}", previous.root().display());
            self.env.active = previous;
        }
    }
}
