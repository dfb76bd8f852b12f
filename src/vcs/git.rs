//! Git command-line client.

use std::path::Path;

use crate::error::{Result, SetupError};
use crate::shell::{execute_checked, CommandOptions};

use super::VersionControl;

/// Runs the `git` executable for each operation.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    /// Create a client that runs `git` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Create a client for a specific git executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The git executable being run.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Fail unless `path` is the top of its own working tree.
    ///
    /// Without this, git walks up from a plain directory to an enclosing
    /// repository and reports (or pulls) that one instead.
    fn ensure_toplevel(&self, path: &Path) -> Result<()> {
        let result = execute_checked(
            &self.program,
            &["rev-parse", "--show-toplevel"],
            &CommandOptions::captured().in_dir(path),
        )?;
        let toplevel = Path::new(result.stdout.trim());
        let same = match (std::fs::canonicalize(toplevel), std::fs::canonicalize(path)) {
            (Ok(top), Ok(here)) => top == here,
            _ => false,
        };
        if same {
            Ok(())
        } else {
            Err(SetupError::Checkout {
                path: path.to_path_buf(),
                message: format!("not a repository root (inside {})", toplevel.display()),
            })
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for GitCli {
    fn status(&self, path: &Path) -> Result<String> {
        self.ensure_toplevel(path)?;
        let result = execute_checked(
            &self.program,
            &["status", "--porcelain"],
            &CommandOptions::captured().in_dir(path),
        )?;
        Ok(result.stdout)
    }

    fn pull(&self, path: &Path) -> Result<()> {
        self.ensure_toplevel(path)?;
        execute_checked(
            &self.program,
            &["pull"],
            &CommandOptions::captured().in_dir(path),
        )?;
        Ok(())
    }

    fn clone_repo(&self, url: &str, path: &Path) -> Result<()> {
        if path.exists() {
            return Err(SetupError::Checkout {
                path: path.to_path_buf(),
                message: "destination already exists".to_string(),
            });
        }
        let target = path.to_string_lossy();
        execute_checked(
            &self.program,
            &["clone", url, target.as_ref()],
            &CommandOptions::captured(),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::is_available;
    use crate::vcs::is_clean;
    use std::process::Command;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Serialize git-process tests to avoid flaky failures under parallel execution
    static GIT_LOCK: Mutex<()> = Mutex::new(());

    fn init_repo(path: &Path) {
        let run = |args: &[&str]| {
            let status = Command::new("git")
                .args(args)
                .current_dir(path)
                .output()
                .unwrap();
            assert!(status.status.success(), "git {:?} failed", args);
        };
        run(&["init", "-q"]);
        run(&["config", "user.email", "test@example.com"]);
        run(&["config", "user.name", "Test"]);
        std::fs::write(path.join("Project.toml"), "name = \"Demo\"\n").unwrap();
        run(&["add", "."]);
        run(&["commit", "-q", "-m", "init"]);
    }

    #[test]
    fn default_program_is_git() {
        assert_eq!(GitCli::new().program(), "git");
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let temp = TempDir::new().unwrap();
        let git = GitCli::with_program("definitely-not-git-4821");
        let err = git.status(temp.path()).unwrap_err();
        assert!(matches!(err, SetupError::CommandSpawn { .. }));
    }

    #[test]
    fn status_of_clean_and_dirty_repository() {
        if !is_available("git") {
            return;
        }
        let _lock = GIT_LOCK.lock().unwrap();
        let temp = TempDir::new().unwrap();
        init_repo(temp.path());

        let git = GitCli::new();
        assert!(is_clean(&git.status(temp.path()).unwrap()));

        std::fs::write(temp.path().join("scratch.jl"), "x = 1\n").unwrap();
        assert!(!is_clean(&git.status(temp.path()).unwrap()));
    }

    #[test]
    fn directory_inside_another_repository_is_rejected() {
        if !is_available("git") {
            return;
        }
        let _lock = GIT_LOCK.lock().unwrap();
        let temp = TempDir::new().unwrap();
        init_repo(temp.path());
        let nested = temp.path().join("dev").join("Sindbad");
        std::fs::create_dir_all(&nested).unwrap();

        let git = GitCli::new();
        assert!(matches!(
            git.status(&nested).unwrap_err(),
            SetupError::Checkout { .. }
        ));
        assert!(matches!(
            git.pull(&nested).unwrap_err(),
            SetupError::Checkout { .. }
        ));
    }

    #[test]
    fn clone_local_repository() {
        if !is_available("git") {
            return;
        }
        let _lock = GIT_LOCK.lock().unwrap();
        let source = TempDir::new().unwrap();
        init_repo(source.path());

        let dest = TempDir::new().unwrap();
        let target = dest.path().join("Demo");
        let git = GitCli::new();
        git.clone_repo(source.path().to_str().unwrap(), &target)
            .unwrap();

        assert!(target.join("Project.toml").is_file());
    }

    #[test]
    fn clone_bad_url_is_command_failure() {
        if !is_available("git") {
            return;
        }
        let _lock = GIT_LOCK.lock().unwrap();
        let dest = TempDir::new().unwrap();
        let git = GitCli::new();
        let err = git
            .clone_repo(
                dest.path().join("no-such-source").to_str().unwrap(),
                &dest.path().join("target"),
            )
            .unwrap_err();
        assert!(matches!(err, SetupError::CommandFailed { .. }));
    }

    #[test]
    fn clone_refuses_existing_destination() {
        let dest = TempDir::new().unwrap();
        let git = GitCli::with_program("definitely-not-git-4821");
        let err = git
            .clone_repo("https://example.com/Demo.jl.git", dest.path())
            .unwrap_err();
        assert!(matches!(err, SetupError::Checkout { .. }));
    }
}
