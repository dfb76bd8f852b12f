//! Unified status vocabulary for consistent CLI output.
//!
//! `StatusKind` provides a single canonical set of status icons and
//! colors used by flow reports and verification reports alike.

use super::theme::Theme;

/// Canonical status kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Operation completed successfully.
    Success,
    /// Operation failed.
    Failed,
    /// Operation was skipped.
    Skipped,
    /// Non-fatal warning.
    Warning,
    /// Informational note that does not affect the outcome.
    Info,
}

impl StatusKind {
    /// Unicode icon for TTY output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Failed => "✗",
            Self::Skipped => "○",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
        }
    }

    /// Bracketed text for non-TTY output.
    pub fn bracketed(self) -> &'static str {
        match self {
            Self::Success => "[ok]",
            Self::Failed => "[FAIL]",
            Self::Skipped => "[skip]",
            Self::Warning => "[warn]",
            Self::Info => "[info]",
        }
    }

    /// Styled icon string using the given theme.
    pub fn styled(self, theme: &Theme) -> String {
        let icon = self.icon();
        match self {
            Self::Success => theme.success.apply_to(icon).to_string(),
            Self::Failed => theme.error.apply_to(icon).to_string(),
            Self::Skipped => theme.dim.apply_to(icon).to_string(),
            Self::Warning => theme.warning.apply_to(icon).to_string(),
            Self::Info => theme.info.apply_to(icon).to_string(),
        }
    }

    /// Format a status line: styled icon + message.
    pub fn format(self, theme: &Theme, msg: &str) -> String {
        format!("{} {}", self.styled(theme), msg)
    }

    /// Format a status line for non-TTY: bracketed + message.
    pub fn format_plain(self, msg: &str) -> String {
        format!("{} {}", self.bracketed(), msg)
    }

    /// Whether this status counts against the run.
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icons_are_distinct() {
        let kinds = [
            StatusKind::Success,
            StatusKind::Failed,
            StatusKind::Skipped,
            StatusKind::Warning,
            StatusKind::Info,
        ];
        let icons: std::collections::HashSet<_> = kinds.iter().map(|k| k.icon()).collect();
        assert_eq!(icons.len(), kinds.len());
    }

    #[test]
    fn format_plain_uses_brackets() {
        assert_eq!(
            StatusKind::Failed.format_plain("clone failed"),
            "[FAIL] clone failed"
        );
    }

    #[test]
    fn format_with_plain_theme() {
        let theme = Theme::plain();
        assert_eq!(StatusKind::Success.format(&theme, "ok"), "✓ ok");
    }

    #[test]
    fn only_failed_is_failure() {
        assert!(StatusKind::Failed.is_failure());
        assert!(!StatusKind::Warning.is_failure());
        assert!(!StatusKind::Info.is_failure());
    }
}
