//! Subprocess execution.
//!
//! Every external collaborator (git, the package manager) runs through
//! [`execute`], strictly one call at a time. Programs are invoked directly
//! with an argument vector rather than through a shell, so paths never need
//! quoting.

use crate::error::{Result, SetupError};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl CommandOptions {
    /// Options that capture both output streams.
    pub fn captured() -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        }
    }

    /// Set the working directory.
    pub fn in_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Render a program and its arguments for messages and logs.
pub fn display_command<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let mut out = program.to_string();
    for arg in args {
        out.push(' ');
        out.push_str(&arg.as_ref().to_string_lossy());
    }
    out
}

/// Execute a program and wait for it to finish.
///
/// A non-zero exit is not an error here; inspect [`CommandResult::success`].
/// Only a failure to start the process is returned as `Err`.
pub fn execute<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    options: &CommandOptions,
) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    tracing::debug!("Executing: {}", display_command(program, args));

    let output = cmd.output().map_err(|e| SetupError::CommandSpawn {
        program: program.to_string(),
        message: e.to_string(),
    })?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        tracing::debug!(
            "Command exited with {:?}: {}",
            output.status.code(),
            display_command(program, args)
        );
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Execute a program, turning a non-zero exit into [`SetupError::CommandFailed`].
pub fn execute_checked<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    options: &CommandOptions,
) -> Result<CommandResult> {
    let result = execute(program, args, options)?;
    if result.success {
        Ok(result)
    } else {
        Err(SetupError::CommandFailed {
            command: display_command(program, args),
            code: result.exit_code,
            stderr: result.stderr,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn execute_captures_stdout() {
        let result = execute("echo", &["hello"], &CommandOptions::captured()).unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[test]
    fn execute_reports_nonzero_exit() {
        let result = execute("sh", &["-c", "exit 3"], &CommandOptions::captured()).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn execute_respects_cwd() {
        let temp = TempDir::new().unwrap();
        let options = CommandOptions::captured().in_dir(temp.path());
        let result = execute("pwd", &[] as &[&str], &options).unwrap();
        let reported = PathBuf::from(result.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn execute_passes_env() {
        let mut options = CommandOptions::captured();
        options
            .env
            .insert("SINDBAD_TEST_VAR".to_string(), "value42".to_string());
        let result = execute("sh", &["-c", "echo $SINDBAD_TEST_VAR"], &options).unwrap();
        assert_eq!(result.stdout.trim(), "value42");
    }

    #[test]
    fn execute_missing_program_is_spawn_error() {
        let err = execute(
            "definitely-not-a-real-program-4821",
            &["x"],
            &CommandOptions::captured(),
        )
        .unwrap_err();
        assert!(matches!(err, SetupError::CommandSpawn { .. }));
    }

    #[test]
    fn execute_checked_converts_failure() {
        let err = execute_checked(
            "sh",
            &["-c", "echo oops >&2; exit 1"],
            &CommandOptions::captured(),
        )
        .unwrap_err();
        match err {
            SetupError::CommandFailed {
                command,
                code,
                stderr,
            } => {
                assert!(command.starts_with("sh -c"));
                assert_eq!(code, Some(1));
                assert!(stderr.contains("oops"));
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn display_command_joins_args() {
        assert_eq!(
            display_command("git", &["clone", "url", "path"]),
            "git clone url path"
        );
    }
}
