//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{Result, SetupError};

use super::{
    parse_answer, ConfirmPolicy, OutputMode, Prompt, ReportRow, SpinnerHandle, UserInterface,
};

/// Prefix of environment variables that answer prompts by key.
pub const PROMPT_ENV_PREFIX: &str = "SINDBAD_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `SINDBAD_PROMPT_<KEY>` environment variables,
/// then from the confirm policy, then from the prompt default. With none of
/// those available `confirm` returns an error.
pub struct NonInteractiveUI {
    mode: OutputMode,
    policy: ConfirmPolicy,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode, policy: ConfirmPolicy) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self::with_overrides(mode, policy, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(
        mode: OutputMode,
        policy: ConfirmPolicy,
        overrides: HashMap<String, String>,
    ) -> Self {
        Self {
            mode,
            policy,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_messages() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        if let Some(answer) = self.env_overrides.get(&env_key).and_then(|v| parse_answer(v)) {
            return Ok(answer);
        }

        match self.policy {
            ConfirmPolicy::AssumeYes => return Ok(true),
            ConfirmPolicy::AssumeNo => return Ok(false),
            ConfirmPolicy::Ask => {}
        }

        if let Some(default) = prompt.default {
            return Ok(default);
        }

        Err(SetupError::Other(anyhow::anyhow!(
            "Cannot ask '{}' in non-interactive mode (set {} or pass --yes)",
            prompt.question,
            env_key
        )))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_messages() {
            println!("  {}", message);
        }
        Box::new(LineSpinner { mode: self.mode })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n▸ {}\n", title);
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_messages() {
            println!("  {}", hint);
        }
    }

    fn show_report(&mut self, title: &str, rows: &[ReportRow]) {
        if !self.mode.shows_status() {
            return;
        }
        println!();
        println!("{}:", title);
        for row in rows {
            println!(
                "  {}",
                row.status
                    .format_plain(&format!("{} - {}", row.subject, row.detail))
            );
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that prints its final status as a plain line.
struct LineSpinner {
    mode: OutputMode,
}

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("  ✓ {}", msg);
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("  ✗ {}", msg);
    }
}
