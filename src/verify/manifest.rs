//! Raw-text inspection of the package manager's manifest.
//!
//! The manifest is never parsed as TOML. Verification only asks whether the
//! text for a dependency's entry mentions it and whether that entry carries
//! the local-path marker, so the check keeps working across manifest format
//! revisions.

use std::path::{Component, Path};

use crate::error::Result;

/// Substring that marks an entry resolved from a local path.
pub const LOCAL_PATH_MARKER: &str = "path = ";

/// Manifest text held for repeated lookups.
#[derive(Debug, Clone, Default)]
pub struct ManifestText {
    text: String,
}

impl ManifestText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read the manifest at `path`.
    pub fn read(path: &Path) -> Result<Self> {
        Ok(Self::new(std::fs::read_to_string(path)?))
    }

    /// The text of `name`'s entry, from its header up to the next header.
    ///
    /// Both the current `[[deps.Name]]` layout and the older top-level
    /// `[[Name]]` layout are recognised.
    pub fn entry(&self, name: &str) -> Option<String> {
        let headers = [format!("[[deps.{name}]]"), format!("[[{name}]]")];
        let mut lines = self.text.lines();

        lines.find(|line| headers.iter().any(|h| line.trim() == h.as_str()))?;

        let body: Vec<&str> = lines
            .take_while(|line| !line.trim_start().starts_with("[["))
            .collect();
        Some(body.join("\n"))
    }

    /// Whether the manifest has an entry for `name`.
    pub fn mentions(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Whether `name`'s entry is resolved from a local path.
    pub fn has_local_path(&self, name: &str) -> bool {
        self.entry(name)
            .is_some_and(|body| body.lines().any(|l| l.trim_start().starts_with(LOCAL_PATH_MARKER)))
    }
}

/// Store directory a resolved path sits in, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Store {
    Development,
    Registry,
}

/// The innermost `dev` or `packages` component decides the store, so a
/// depot under `/home/dev` still reads as the package store.
fn store_of(path: &Path) -> Option<Store> {
    path.components().rev().find_map(|c| match c {
        Component::Normal(part) if part == "dev" => Some(Store::Development),
        Component::Normal(part) if part == "packages" => Some(Store::Registry),
        _ => None,
    })
}

/// Whether a resolved source path points at a development checkout.
pub fn is_development_path(resolved: &Path, checkout: &Path) -> bool {
    resolved.starts_with(checkout) || store_of(resolved) == Some(Store::Development)
}

/// Whether a resolved source path points into the registry's package store.
pub fn is_registry_path(resolved: &Path) -> bool {
    store_of(resolved) == Some(Store::Registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"# This file is machine-generated - editing it directly is not advised

julia_version = "1.10.4"
manifest_format = "2.0"

[[deps.ErrorMetrics]]
deps = ["Statistics"]
path = "dev/ErrorMetrics"
uuid = "11111111-1111-1111-1111-111111111111"
version = "0.1.0"

[[deps.Sindbad]]
deps = ["ErrorMetrics", "OmniTools"]
git-tree-sha1 = "0123456789abcdef"
uuid = "22222222-2222-2222-2222-222222222222"
version = "0.5.0"

[[deps.Statistics]]
uuid = "10745b16-79ce-11e8-11f9-7d13ad32a3b2"
"#;

    #[test]
    fn entry_is_scoped_to_its_section() {
        let manifest = ManifestText::new(MANIFEST);
        let body = manifest.entry("Sindbad").unwrap();
        assert!(body.contains("0.5.0"));
        assert!(!body.contains("10745b16"));
        assert!(!body.contains(LOCAL_PATH_MARKER));
    }

    #[test]
    fn local_path_detected_per_entry() {
        let manifest = ManifestText::new(MANIFEST);
        assert!(manifest.has_local_path("ErrorMetrics"));
        assert!(!manifest.has_local_path("Sindbad"));
        assert!(!manifest.has_local_path("OmniTools"));
    }

    #[test]
    fn dependency_list_mention_is_not_an_entry() {
        let manifest = ManifestText::new(MANIFEST);
        assert!(!manifest.mentions("OmniTools"));
        assert!(manifest.mentions("Statistics"));
    }

    #[test]
    fn legacy_layout_is_recognised() {
        let manifest = ManifestText::new("[[TimeSamplers]]\npath = \"/work/dev/TimeSamplers\"\n");
        assert!(manifest.has_local_path("TimeSamplers"));
    }

    #[test]
    fn read_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(ManifestText::read(&temp.path().join("Manifest.toml")).is_err());
    }

    #[test]
    fn development_path_markers() {
        let checkout = Path::new("/work/tutorial/dev/Sindbad");
        assert!(is_development_path(
            Path::new("/work/tutorial/dev/Sindbad/src/Sindbad.jl"),
            checkout
        ));
        assert!(is_development_path(
            Path::new("/home/me/.julia/dev/OmniTools/src/OmniTools.jl"),
            Path::new("/elsewhere")
        ));
        assert!(!is_development_path(
            Path::new("/home/me/.julia/packages/Sindbad/AbCd1/src/Sindbad.jl"),
            checkout
        ));
    }

    #[test]
    fn innermost_store_marker_wins() {
        let store = Path::new("/home/dev/.julia/packages/OmniTools/x/src/OmniTools.jl");
        assert!(!is_development_path(store, Path::new("/work/tut/dev/OmniTools")));
        assert!(is_registry_path(store));

        let checkout = Path::new("/srv/packages/tut/dev/OmniTools/src/OmniTools.jl");
        assert!(is_development_path(checkout, Path::new("/elsewhere")));
        assert!(!is_registry_path(checkout));
    }

    #[test]
    fn registry_path_marker() {
        assert!(is_registry_path(Path::new(
            "/home/me/.julia/packages/Sindbad/AbCd1/src/Sindbad.jl"
        )));
        assert!(!is_registry_path(Path::new("/work/my-packages/Sindbad.jl")));
    }
}
