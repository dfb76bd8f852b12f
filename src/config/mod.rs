//! Settings loading and parsing.
//!
//! - Schema definitions in [`schema`]
//! - File lookup and TOML parsing in [`loader`]
//!
//! # Example
//!
//! ```
//! use sindbad_env::config::load_settings;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("settings.toml");
//! fs::write(&path, "[mode]\nsindbad = \"dev\"\n").unwrap();
//!
//! let settings = load_settings(&path).unwrap();
//! assert_eq!(settings.mode_selector(), Some("dev"));
//! ```
//!
//! # Settings File Location
//!
//! The settings file defaults to `settings.toml` in the project root and
//! is optional: without it every dependency uses its compiled-in source
//! and the mode is `run`.

pub mod loader;
pub mod schema;

pub use loader::{default_settings_path, load_settings, parse_settings, SETTINGS_FILE_NAME};
pub use schema::{DependencyOverride, ModeSettings, Settings};
