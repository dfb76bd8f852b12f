//! Interactive user interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for tests
//! - Confirmation prompts, spinners, and report tables
//!
//! # Example
//!
//! ```
//! use sindbad_env::ui::{create_ui, ConfirmPolicy, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet, ConfirmPolicy::Ask);
//! ui.show_header("Development mode");
//! ui.success("All checks passed");
//! ```

pub mod icons;
pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use icons::StatusKind;
pub use mock::{MockSpinner, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::prompt_confirm;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, Theme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests. Its `confirm` method is the
/// confirmation provider for interactive decisions such as pulling a
/// checkout.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Ask a yes/no question.
    ///
    /// An `Err` means no answer could be obtained; callers treat that the
    /// same as "no".
    fn confirm(&mut self, prompt: &Prompt) -> Result<bool>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a contextual hint.
    fn show_hint(&mut self, hint: &str);

    /// Show a titled table of status rows.
    fn show_report(&mut self, title: &str, rows: &[ReportRow]);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}

/// A yes/no question.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for environment overrides and mocks).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// Answer used when the user just presses enter.
    pub default: Option<bool>,
}

impl Prompt {
    /// Create a confirmation prompt without a default answer.
    pub fn confirm(key: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
            default: None,
        }
    }

    /// Set the default answer.
    pub fn with_default(mut self, default: bool) -> Self {
        self.default = Some(default);
        self
    }
}

/// How confirmation prompts are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmPolicy {
    /// Ask the user.
    #[default]
    Ask,
    /// Answer yes without asking.
    AssumeYes,
    /// Answer no without asking.
    AssumeNo,
}

/// One line of a report table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Outcome marker.
    pub status: StatusKind,
    /// What the row is about (a dependency name, a check).
    pub subject: String,
    /// Short description of the outcome.
    pub detail: String,
}

impl ReportRow {
    /// Create a report row.
    pub fn new(status: StatusKind, subject: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status,
            subject: subject.into(),
            detail: detail.into(),
        }
    }
}

/// Parse a textual yes/no answer.
pub fn parse_answer(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}
