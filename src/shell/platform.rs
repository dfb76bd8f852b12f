//! Platform detection.

use std::path::Path;

/// Detect if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check whether a program can be found.
///
/// Absolute or relative paths are checked directly; bare names are looked
/// up in each `PATH` entry.
pub fn is_available(program: &str) -> bool {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file();
    }

    let Some(path_var) = std::env::var_os("PATH") else {
        return false;
    };

    std::env::split_paths(&path_var).any(|dir| {
        let full = dir.join(program);
        if full.is_file() {
            return true;
        }
        cfg!(windows) && full.with_extension("exe").is_file()
    })
}
