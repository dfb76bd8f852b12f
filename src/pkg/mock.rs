//! Mock package manager for testing.
//!
//! `MockPackageManager` records every primitive together with the project it
//! was issued against, and can be told to fail specific operations. With
//! [`MockPackageManager::write_manifests`] enabled it also maintains a
//! minimal `Manifest.toml` so verification can be exercised end to end.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError};

use super::{PackageManager, ProjectContext, RemoveOutcome};

/// A recorded package-manager call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PkgCall {
    Activate(PathBuf),
    Develop { project: PathBuf, path: PathBuf },
    Add { project: PathBuf, name: String },
    Remove { project: PathBuf, name: String },
    Instantiate { project: PathBuf },
    Locate { project: PathBuf, name: String },
}

/// Mock [`PackageManager`] implementation.
#[derive(Debug, Default)]
pub struct MockPackageManager {
    calls: RefCell<Vec<PkgCall>>,
    registered: RefCell<HashSet<String>>,
    failing_develops: HashSet<PathBuf>,
    failing_removes: HashSet<String>,
    failing_adds: HashSet<String>,
    fail_instantiate: bool,
    locations: HashMap<String, PathBuf>,
    write_manifests: bool,
}

impl MockPackageManager {
    /// Create a mock where every operation succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `name` as already registered, so removing it yields `Removed`.
    pub fn register(&self, name: &str) {
        self.registered.borrow_mut().insert(name.to_string());
    }

    /// Make `develop` of `path` fail.
    pub fn fail_develop(&mut self, path: impl Into<PathBuf>) {
        self.failing_develops.insert(path.into());
    }

    /// Make `remove` of `name` fail.
    pub fn fail_remove(&mut self, name: &str) {
        self.failing_removes.insert(name.to_string());
    }

    /// Make `add` of `name` fail.
    pub fn fail_add(&mut self, name: &str) {
        self.failing_adds.insert(name.to_string());
    }

    /// Make `instantiate` fail.
    pub fn fail_instantiate(&mut self) {
        self.fail_instantiate = true;
    }

    /// Make `locate(name)` report `path`. Unset names fail to load.
    pub fn set_location(&mut self, name: &str, path: impl Into<PathBuf>) {
        self.locations.insert(name.to_string(), path.into());
    }

    /// Keep a minimal manifest in each project this mock touches.
    pub fn write_manifests(&mut self, enabled: bool) {
        self.write_manifests = enabled;
    }

    /// All calls, in order.
    pub fn calls(&self) -> Vec<PkgCall> {
        self.calls.borrow().clone()
    }

    /// Paths passed to `develop` for `project`, in order.
    pub fn developed_in(&self, project: &Path) -> Vec<PathBuf> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                PkgCall::Develop { project: p, path } if p == project => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    /// Names passed to `remove`, in order.
    pub fn removed(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                PkgCall::Remove { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Names passed to `add`, in order.
    pub fn added(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                PkgCall::Add { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: PkgCall) {
        self.calls.borrow_mut().push(call);
    }

    fn failure(operation: String) -> SetupError {
        SetupError::PackageManager {
            operation,
            message: "simulated failure".to_string(),
        }
    }

    fn update_manifest(
        &self,
        ctx: &ProjectContext,
        name: &str,
        body: Option<String>,
    ) -> Result<()> {
        if !self.write_manifests {
            return Ok(());
        }
        let path = ctx.manifest_file();
        let existing = std::fs::read_to_string(&path).unwrap_or_default();
        let header = format!("[[deps.{name}]]");

        let mut kept = String::new();
        let mut skipping = false;
        for line in existing.lines() {
            if line.trim_start().starts_with("[[") {
                skipping = line.trim() == header;
            }
            if !skipping {
                kept.push_str(line);
                kept.push('\n');
            }
        }

        if let Some(body) = body {
            kept.push_str(&format!("\n{header}\n{body}\n"));
        }
        std::fs::write(path, kept)?;
        Ok(())
    }
}

impl PackageManager for MockPackageManager {
    fn activate(&self, path: &Path) -> Result<ProjectContext> {
        self.record(PkgCall::Activate(path.to_path_buf()));
        ProjectContext::open(path)
    }

    fn develop(&self, ctx: &ProjectContext, path: &Path) -> Result<()> {
        self.record(PkgCall::Develop {
            project: ctx.root().to_path_buf(),
            path: path.to_path_buf(),
        });
        if self.failing_develops.contains(path) {
            return Err(Self::failure(format!("develop {}", path.display())));
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            self.registered.borrow_mut().insert(name.to_string());
            let body = format!(
                "path = {:?}\nuuid = \"00000000-0000-0000-0000-000000000000\"",
                path
            );
            self.update_manifest(ctx, name, Some(body))?;
        }
        Ok(())
    }

    fn add(&self, ctx: &ProjectContext, name: &str) -> Result<()> {
        self.record(PkgCall::Add {
            project: ctx.root().to_path_buf(),
            name: name.to_string(),
        });
        if self.failing_adds.contains(name) {
            return Err(Self::failure(format!("add {name}")));
        }
        self.registered.borrow_mut().insert(name.to_string());
        let body = "git-tree-sha1 = \"0123456789abcdef\"\nversion = \"1.0.0\"".to_string();
        self.update_manifest(ctx, name, Some(body))
    }

    fn remove(&self, ctx: &ProjectContext, name: &str) -> Result<RemoveOutcome> {
        self.record(PkgCall::Remove {
            project: ctx.root().to_path_buf(),
            name: name.to_string(),
        });
        if self.failing_removes.contains(name) {
            return Err(Self::failure(format!("rm {name}")));
        }
        if self.registered.borrow_mut().remove(name) {
            self.update_manifest(ctx, name, None)?;
            Ok(RemoveOutcome::Removed)
        } else {
            Ok(RemoveOutcome::NotRegistered)
        }
    }

    fn instantiate(&self, ctx: &ProjectContext) -> Result<()> {
        self.record(PkgCall::Instantiate {
            project: ctx.root().to_path_buf(),
        });
        if self.fail_instantiate {
            return Err(Self::failure("instantiate".to_string()));
        }
        Ok(())
    }

    fn locate(&self, ctx: &ProjectContext, name: &str) -> Result<Option<PathBuf>> {
        self.record(PkgCall::Locate {
            project: ctx.root().to_path_buf(),
            name: name.to_string(),
        });
        match self.locations.get(name) {
            Some(path) => Ok(Some(path.clone())),
            None => Err(SetupError::PackageManager {
                operation: format!("locate {name}"),
                message: format!("ArgumentError: Package {name} not found in current path"),
            }),
        }
    }
}
