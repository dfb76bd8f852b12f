//! Settings file lookup and loading.

use crate::config::schema::Settings;
use crate::error::{Result, SetupError};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the settings file inside the project root.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Default settings location for a project.
pub fn default_settings_path(project_root: &Path) -> PathBuf {
    project_root.join(SETTINGS_FILE_NAME)
}

/// Load the settings file.
///
/// A missing file is not an error: it yields [`Settings::default`].
///
/// # Errors
///
/// Returns `ConfigParseError` if the TOML is invalid, or `Io` if the file
/// exists but cannot be read.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No settings file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(e) => return Err(SetupError::Io(e)),
    };

    tracing::debug!("Loading settings from {}", path.display());
    parse_settings(&content, path)
}

/// Parse TOML content into [`Settings`].
///
/// # Arguments
///
/// * `content` - The TOML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_settings(content: &str, source_path: &Path) -> Result<Settings> {
    toml::from_str(content).map_err(|e| SetupError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
