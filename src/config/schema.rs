//! Settings schema.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parsed settings file.
///
/// ```toml
/// [mode]
/// sindbad = "dev"
///
/// [ErrorMetrics]
/// git_url = "git@github.com:me/ErrorMetrics.jl.git"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    /// Mode selectors.
    #[serde(default)]
    pub mode: ModeSettings,

    /// Per-dependency overrides, keyed by dependency name.
    #[serde(flatten)]
    pub dependencies: BTreeMap<String, DependencyOverride>,
}

/// The `[mode]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ModeSettings {
    /// `"dev"` or `"run"`. Kept as raw text so an unknown value can be
    /// reported gracefully instead of failing the parse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sindbad: Option<String>,
}

/// Overrides for a single dependency.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DependencyOverride {
    /// Clone URL replacing the compiled-in default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_url: Option<String>,
}

impl Settings {
    /// The raw mode selector, if set.
    pub fn mode_selector(&self) -> Option<&str> {
        self.mode.sindbad.as_deref()
    }

    /// Source override for a dependency. Blank values count as unset.
    pub fn source_override(&self, name: &str) -> Option<&str> {
        self.dependencies
            .get(name)
            .and_then(|o| o.git_url.as_deref())
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Names of override tables that the given predicate does not accept.
    ///
    /// Used to warn about tables naming dependencies that are not managed.
    pub fn unrecognized<'a>(&'a self, is_managed: impl Fn(&str) -> bool) -> Vec<&'a str> {
        self.dependencies
            .keys()
            .map(String::as_str)
            .filter(|name| !is_managed(name))
            .collect()
    }
}
