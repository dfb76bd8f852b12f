//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// sindbad-env - Switch SINDBAD dependencies between local checkouts and registry releases.
#[derive(Debug, Parser)]
#[command(name = "sindbad-env")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Path to the settings file (overrides <project>/settings.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Julia executable used for package operations
    #[arg(long, global = true, env = "SINDBAD_JULIA", default_value = "julia")]
    pub julia: String,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply the configured mode, instantiate, and verify (default if no command specified)
    Setup(SetupArgs),

    /// Check that the project matches the configured mode without changing it
    Verify(VerifyArgs),

    /// List managed dependencies and their resolved sources
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `setup` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SetupArgs {
    /// Mode to apply (dev or run), overriding the settings file
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Pull existing clean checkouts without asking
    #[arg(short, long, conflicts_with = "non_interactive")]
    pub yes: bool,

    /// Never prompt; unanswered questions are treated as "no"
    #[arg(long)]
    pub non_interactive: bool,

    /// Skip loading packages to inspect where they resolve from
    #[arg(long)]
    pub skip_load_check: bool,
}

/// Arguments for the `verify` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct VerifyArgs {
    /// Mode to verify against (dev or run), overriding the settings file
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Skip loading packages to inspect where they resolve from
    #[arg(long)]
    pub skip_load_check: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
