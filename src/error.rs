//! Error types for environment setup.
//!
//! This module defines [`SetupError`], the primary error type used throughout
//! the tool, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration errors abort a run before anything is mutated
//! - Per-dependency failures (clone, pull, develop, rm, add) are recovered
//!   by the flows and recorded in a report; they surface here only at the
//!   collaborator boundary
//! - Use `anyhow::Error` (via `SetupError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for setup operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Failed to parse the settings file.
    #[error("Failed to parse settings at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The mode selector holds a value that is neither `dev` nor `run`.
    #[error("Unknown mode '{value}' (expected \"dev\" or \"run\")")]
    UnknownMode { value: String },

    /// An external command ran but exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// An external command could not be started at all.
    #[error("Could not run '{program}': {message}")]
    CommandSpawn { program: String, message: String },

    /// A checkout operation could not be carried out.
    #[error("Checkout '{path}' failed: {message}")]
    Checkout { path: PathBuf, message: String },

    /// A package manager primitive failed.
    #[error("Package operation '{operation}' failed: {message}")]
    PackageManager { operation: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SetupError {
    /// Short text suitable for a one-line report entry.
    ///
    /// For failed commands the last non-empty stderr line is usually the
    /// package manager's own explanation, so prefer it over the command.
    pub fn summary(&self) -> String {
        match self {
            Self::CommandFailed { stderr, .. } => stderr
                .lines()
                .rev()
                .map(str::trim)
                .find(|l| !l.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| self.to_string()),
            other => other.to_string(),
        }
    }
}

/// Result type alias for setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = SetupError::ConfigParseError {
            path: PathBuf::from("/settings.toml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/settings.toml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn unknown_mode_displays_value() {
        let err = SetupError::UnknownMode {
            value: "staging".into(),
        };
        assert!(err.to_string().contains("staging"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = SetupError::CommandFailed {
            command: "git pull".into(),
            code: Some(1),
            stderr: String::new(),
        };
        let msg = err.to_string();
        assert!(msg.contains("git pull"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn summary_prefers_last_stderr_line() {
        let err = SetupError::CommandFailed {
            command: "git clone".into(),
            code: Some(128),
            stderr: "Cloning into 'x'...\nfatal: repository not found\n\n".into(),
        };
        assert_eq!(err.summary(), "fatal: repository not found");
    }

    #[test]
    fn summary_falls_back_to_display() {
        let err = SetupError::CommandFailed {
            command: "git clone".into(),
            code: Some(128),
            stderr: "   \n".into(),
        };
        assert!(err.summary().contains("git clone"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: SetupError = io_err.into();
        assert!(matches!(err, SetupError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts() {
        let err: SetupError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
