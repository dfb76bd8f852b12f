//! Version-control collaborator.
//!
//! The development flow only needs three primitives from git: a porcelain
//! status query, a pull, and a clone. [`VersionControl`] is the seam that
//! lets tests substitute [`MockVcs`] for the real [`GitCli`].

pub mod git;
pub mod mock;

pub use git::GitCli;
pub use mock::{MockVcs, VcsCall};

use std::path::Path;

use crate::error::Result;

/// Version-control operations used on dependency checkouts.
pub trait VersionControl {
    /// Porcelain status of the working tree at `path`.
    ///
    /// Empty output means the tree is clean.
    fn status(&self, path: &Path) -> Result<String>;

    /// Pull the latest changes into the checkout at `path`.
    fn pull(&self, path: &Path) -> Result<()>;

    /// Clone `url` into `path`. The parent of `path` must already exist.
    fn clone_repo(&self, url: &str, path: &Path) -> Result<()>;
}

/// Whether porcelain status output describes a clean working tree.
pub fn is_clean(status: &str) -> bool {
    status.trim().is_empty()
}
