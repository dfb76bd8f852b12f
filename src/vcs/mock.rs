//! Mock version control for testing.
//!
//! `MockVcs` records every call and simulates clones by creating the target
//! directory, so flows can be exercised without a network or a git binary.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError};

use super::VersionControl;

/// A recorded version-control call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    Status(PathBuf),
    Pull(PathBuf),
    Clone {
        url: String,
        path: PathBuf,
        /// Whether the parent directory existed when clone was called.
        parent_existed: bool,
    },
}

/// Mock [`VersionControl`] implementation.
#[derive(Debug, Default)]
pub struct MockVcs {
    calls: RefCell<Vec<VcsCall>>,
    statuses: HashMap<PathBuf, String>,
    failing_urls: HashSet<String>,
    failing_pulls: HashSet<PathBuf>,
    clone_layout: HashMap<String, Vec<PathBuf>>,
}

impl MockVcs {
    /// Create a mock where every tree is clean and every clone succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `status` as the porcelain output for `path`.
    pub fn set_status(&mut self, path: impl Into<PathBuf>, status: &str) {
        self.statuses.insert(path.into(), status.to_string());
    }

    /// Make cloning `url` fail.
    pub fn fail_clone(&mut self, url: &str) {
        self.failing_urls.insert(url.to_string());
    }

    /// Make pulling into `path` fail.
    pub fn fail_pull(&mut self, path: impl Into<PathBuf>) {
        self.failing_pulls.insert(path.into());
    }

    /// Create these relative paths inside the checkout when `url` is cloned.
    ///
    /// Entries ending in `.toml` or `.jl` are created as files, everything
    /// else as directories.
    pub fn set_clone_layout(&mut self, url: &str, entries: &[&str]) {
        self.clone_layout
            .insert(url.to_string(), entries.iter().map(PathBuf::from).collect());
    }

    /// All calls, in order.
    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.borrow().clone()
    }

    /// URLs that were cloned, in order.
    pub fn cloned_urls(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                VcsCall::Clone { url, .. } => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    /// Paths that were pulled, in order.
    pub fn pulled_paths(&self) -> Vec<PathBuf> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                VcsCall::Pull(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    fn materialize(&self, url: &str, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)?;
        for entry in self.clone_layout.get(url).into_iter().flatten() {
            let full = path.join(entry);
            let is_file = matches!(
                entry.extension().and_then(|e| e.to_str()),
                Some("toml") | Some("jl")
            );
            if is_file {
                if let Some(parent) = full.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&full, "")?;
            } else {
                std::fs::create_dir_all(&full)?;
            }
        }
        Ok(())
    }
}

impl VersionControl for MockVcs {
    fn status(&self, path: &Path) -> Result<String> {
        self.calls
            .borrow_mut()
            .push(VcsCall::Status(path.to_path_buf()));
        Ok(self.statuses.get(path).cloned().unwrap_or_default())
    }

    fn pull(&self, path: &Path) -> Result<()> {
        self.calls.borrow_mut().push(VcsCall::Pull(path.to_path_buf()));
        if self.failing_pulls.contains(path) {
            return Err(SetupError::CommandFailed {
                command: format!("git pull ({})", path.display()),
                code: Some(1),
                stderr: "fatal: could not read from remote repository".to_string(),
            });
        }
        Ok(())
    }

    fn clone_repo(&self, url: &str, path: &Path) -> Result<()> {
        let parent_existed = path.parent().map(Path::is_dir).unwrap_or(true);
        self.calls.borrow_mut().push(VcsCall::Clone {
            url: url.to_string(),
            path: path.to_path_buf(),
            parent_existed,
        });

        if self.failing_urls.contains(url) {
            return Err(SetupError::CommandFailed {
                command: format!("git clone {url}"),
                code: Some(128),
                stderr: format!("fatal: repository '{url}' not found"),
            });
        }

        self.materialize(url, path)
    }
}
