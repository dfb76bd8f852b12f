//! Managed dependency records.

use serde::Serialize;
use std::path::PathBuf;

/// A dependency whose resolution mode the tool switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencySpec {
    /// Package name, unique within the registry.
    pub name: String,
    /// Development checkout location, relative to the project root.
    pub local_path: PathBuf,
    /// Remote location to clone from when no override is configured.
    pub default_source: Option<String>,
}

impl DependencySpec {
    /// Create a new dependency record.
    pub fn new(name: &str, local_path: impl Into<PathBuf>, default_source: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            local_path: local_path.into(),
            default_source: default_source.map(String::from),
        }
    }
}
