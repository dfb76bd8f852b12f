//! sindbad-env - Switch a SINDBAD tutorial environment between development
//! checkouts and registry releases.
//!
//! A project depends on a small, fixed set of Julia packages. In
//! development mode each one is cloned (or updated) under `dev/` and
//! registered as a local-path dependency, and the distinguished `Sindbad`
//! package gets the same wiring inside its own environment. In registry
//! mode every development registration is removed and `Sindbad` is added
//! from the package registry. Either way the project is instantiated and
//! the result verified.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings file loading
//! - [`error`] - Error types and result aliases
//! - [`modes`] - The development and registry flows
//! - [`pkg`] - Package-manager collaborator and active project tracking
//! - [`registry`] - The managed dependency set
//! - [`setup`] - End-to-end orchestration
//! - [`shell`] - Subprocess execution
//! - [`ui`] - Prompts, spinners, and terminal output
//! - [`vcs`] - Version-control collaborator
//! - [`verify`] - Post-flow verification
//!
//! # Example
//!
//! ```
//! use sindbad_env::modes::EnvironmentMode;
//! use sindbad_env::registry::DependencyRegistry;
//!
//! let registry = DependencyRegistry::builtin();
//! assert_eq!(registry.distinguished().unwrap().name, "Sindbad");
//! assert_eq!(
//!     EnvironmentMode::resolve(Some("dev")).unwrap(),
//!     EnvironmentMode::Development
//! );
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod modes;
pub mod pkg;
pub mod registry;
pub mod setup;
pub mod shell;
pub mod ui;
pub mod vcs;
pub mod verify;

pub use error::{Result, SetupError};
