//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::{
    prompt_confirm, should_use_colors, ConfirmPolicy, NonInteractiveUI, OutputMode,
    ProgressSpinner, Prompt, ReportRow, SpinnerHandle, Theme, UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: Theme,
    mode: OutputMode,
    policy: ConfirmPolicy,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, policy: ConfirmPolicy) -> Self {
        let theme = if should_use_colors() {
            Theme::new()
        } else {
            Theme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
            policy,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_messages() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        match self.policy {
            ConfirmPolicy::AssumeYes => Ok(true),
            ConfirmPolicy::AssumeNo => Ok(false),
            ConfirmPolicy::Ask => prompt_confirm(prompt, &self.term),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_messages() {
            writeln!(self.term, "  {}", self.theme.hint.apply_to(hint)).ok();
        }
    }

    fn show_report(&mut self, title: &str, rows: &[ReportRow]) {
        if !self.mode.shows_status() {
            return;
        }

        let b = &self.theme.border;
        let width = rows.iter().map(|r| r.subject.len()).max().unwrap_or(0).max(12);

        writeln!(self.term).ok();
        writeln!(
            self.term,
            "  {} {}",
            b.apply_to("┌─"),
            b.apply_to(format!("{} ──────────────────────────", title))
        )
        .ok();

        for row in rows {
            writeln!(
                self.term,
                "  {} {} {:<width$} {}",
                b.apply_to("│"),
                row.status.styled(&self.theme),
                row.subject,
                self.theme.dim.apply_to(&row.detail),
                width = width,
            )
            .ok();
        }

        writeln!(
            self.term,
            "  {}",
            b.apply_to("└────────────────────────────────────")
        )
        .ok();
    }

    fn is_interactive(&self) -> bool {
        self.policy == ConfirmPolicy::Ask && self.term.is_term()
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(
    interactive: bool,
    mode: OutputMode,
    policy: ConfirmPolicy,
) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode, policy))
    } else {
        Box::new(NonInteractiveUI::new(mode, policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_output_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet, ConfirmPolicy::Ask);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn terminal_ui_assume_yes_does_not_prompt() {
        let mut ui = TerminalUI::new(OutputMode::Silent, ConfirmPolicy::AssumeYes);
        assert!(ui.confirm(&Prompt::confirm("k", "q")).unwrap());
        assert!(!ui.is_interactive());
    }

    #[test]
    fn create_ui_non_interactive() {
        let ui = create_ui(false, OutputMode::Normal, ConfirmPolicy::Ask);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn create_ui_respects_mode() {
        let ui = create_ui(false, OutputMode::Silent, ConfirmPolicy::Ask);
        assert_eq!(ui.output_mode(), OutputMode::Silent);
    }
}
