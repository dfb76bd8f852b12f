//! Julia `Pkg` driven through the `julia` executable.
//!
//! Each primitive starts a fresh `julia --project=<root>` process and runs a
//! one-line `Pkg` expression. A fresh process per call means registrations
//! made earlier in the run are always visible to later calls.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{Result, SetupError};
use crate::shell::{execute, CommandOptions, CommandResult};

use super::{PackageManager, ProjectContext, RemoveOutcome};

/// Matches `Pkg.rm` complaints about a package that is not in the project.
static NOT_REGISTERED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(not found in (the )?(project|manifest)|could not be resolved|is not in (the )?project)")
        .expect("NOT_REGISTERED_REGEX must compile")
});

/// First `ERROR:` line of Julia output.
static ERROR_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^ERROR:\s*(.+)$").expect("ERROR_LINE_REGEX must compile")
});

/// Julia package manager client.
#[derive(Debug, Clone)]
pub struct JuliaPkg {
    program: String,
}

impl JuliaPkg {
    /// Create a client for the given `julia` executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The `julia` executable being run.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Build the argument vector for evaluating `code` in `ctx`.
    pub fn args(ctx: &ProjectContext, code: &str) -> Vec<String> {
        vec![
            "--startup-file=no".to_string(),
            "--history-file=no".to_string(),
            format!("--project={}", ctx.root().display()),
            "-e".to_string(),
            code.to_string(),
        ]
    }

    fn eval(&self, ctx: &ProjectContext, code: &str) -> Result<CommandResult> {
        let args = Self::args(ctx, code);
        execute(&self.program, &args, &CommandOptions::captured().in_dir(ctx.root()))
    }

    fn eval_checked(
        &self,
        ctx: &ProjectContext,
        operation: &str,
        code: &str,
    ) -> Result<CommandResult> {
        let result = self.eval(ctx, code)?;
        if result.success {
            Ok(result)
        } else {
            Err(SetupError::PackageManager {
                operation: operation.to_string(),
                message: error_message(&result),
            })
        }
    }
}

impl Default for JuliaPkg {
    fn default() -> Self {
        Self::new("julia")
    }
}

impl PackageManager for JuliaPkg {
    fn develop(&self, ctx: &ProjectContext, path: &Path) -> Result<()> {
        let code = format!(
            "using Pkg; Pkg.develop(path={})",
            julia_string(&path.to_string_lossy())
        );
        self.eval_checked(ctx, &format!("develop {}", path.display()), &code)?;
        Ok(())
    }

    fn add(&self, ctx: &ProjectContext, name: &str) -> Result<()> {
        let code = format!("using Pkg; Pkg.add({})", julia_string(name));
        self.eval_checked(ctx, &format!("add {name}"), &code)?;
        Ok(())
    }

    fn remove(&self, ctx: &ProjectContext, name: &str) -> Result<RemoveOutcome> {
        let code = format!("using Pkg; Pkg.rm({})", julia_string(name));
        let result = self.eval(ctx, &code)?;
        if result.success {
            return Ok(RemoveOutcome::Removed);
        }
        if is_not_registered(&result.stderr) {
            tracing::debug!("{name} was not registered in {}", ctx.root().display());
            return Ok(RemoveOutcome::NotRegistered);
        }
        Err(SetupError::PackageManager {
            operation: format!("rm {name}"),
            message: error_message(&result),
        })
    }

    fn instantiate(&self, ctx: &ProjectContext) -> Result<()> {
        self.eval_checked(ctx, "instantiate", "using Pkg; Pkg.instantiate()")?;
        Ok(())
    }

    fn locate(&self, ctx: &ProjectContext, name: &str) -> Result<Option<PathBuf>> {
        if !is_identifier(name) {
            return Err(SetupError::PackageManager {
                operation: format!("locate {name}"),
                message: "not a valid package name".to_string(),
            });
        }
        let code = format!("import {name}; print(something(pathof({name}), \"\"))");
        let result = self.eval_checked(ctx, &format!("locate {name}"), &code)?;
        let path = result.stdout.trim();
        if path.is_empty() {
            Ok(None)
        } else {
            Ok(Some(PathBuf::from(path)))
        }
    }
}

/// Quote `value` as a Julia string literal.
pub fn julia_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Whether `Pkg.rm` stderr says the package simply was not there.
pub fn is_not_registered(stderr: &str) -> bool {
    NOT_REGISTERED_REGEX.is_match(stderr)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn error_message(result: &CommandResult) -> String {
    if let Some(caps) = ERROR_LINE_REGEX.captures(&result.stderr) {
        return caps[1].trim().to_string();
    }
    result
        .stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("julia exited with code {:?}", result.exit_code))
}
