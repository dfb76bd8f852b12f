//! Flow outcome reporting.

use std::fmt;

use crate::ui::{ReportRow, StatusKind};

/// The kind of operation a report entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowAction {
    /// Querying the working tree status.
    Status,
    /// Pulling into an existing checkout.
    Pull,
    /// Cloning a new checkout.
    Clone,
    /// Resolving where a dependency comes from.
    Configure,
    /// Registering a development dependency in the active project.
    Develop,
    /// Registering a development dependency inside the distinguished
    /// dependency's environment.
    NestedDevelop,
    /// Switching or restoring the active project.
    Activate,
    /// Removing a registration.
    Remove,
    /// Adding from the package registry.
    Add,
    /// Instantiating the active project.
    Instantiate,
}

impl fmt::Display for FlowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Status => "status",
            Self::Pull => "pull",
            Self::Clone => "clone",
            Self::Configure => "source",
            Self::Develop => "develop",
            Self::NestedDevelop => "nested develop",
            Self::Activate => "activate",
            Self::Remove => "rm",
            Self::Add => "add",
            Self::Instantiate => "instantiate",
        };
        f.write_str(s)
    }
}

/// One recorded outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEntry {
    /// Dependency name or other subject of the operation.
    pub subject: String,
    /// What was attempted.
    pub action: FlowAction,
    /// How it went.
    pub status: StatusKind,
    /// Short human-readable detail.
    pub detail: String,
}

/// Accumulated outcomes of a flow, in the order they happened.
#[derive(Debug, Clone, Default)]
pub struct FlowReport {
    entries: Vec<FlowEntry>,
}

impl FlowReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome.
    pub fn record(
        &mut self,
        subject: &str,
        action: FlowAction,
        status: StatusKind,
        detail: impl Into<String>,
    ) {
        self.entries.push(FlowEntry {
            subject: subject.to_string(),
            action,
            status,
            detail: detail.into(),
        });
    }

    /// All entries.
    pub fn entries(&self) -> &[FlowEntry] {
        &self.entries
    }

    /// Entries that failed.
    pub fn failures(&self) -> impl Iterator<Item = &FlowEntry> {
        self.entries.iter().filter(|e| e.status.is_failure())
    }

    /// Whether anything failed.
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// First entry for a subject and action.
    pub fn find(&self, subject: &str, action: FlowAction) -> Option<&FlowEntry> {
        self.entries
            .iter()
            .find(|e| e.subject == subject && e.action == action)
    }

    /// Rows for display.
    pub fn rows(&self) -> Vec<ReportRow> {
        self.entries
            .iter()
            .map(|e| ReportRow::new(e.status, &e.subject, format!("{}: {}", e.action, e.detail)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut report = FlowReport::new();
        report.record("Sindbad", FlowAction::Clone, StatusKind::Success, "cloned");
        report.record("OmniTools", FlowAction::Clone, StatusKind::Failed, "not found");

        assert_eq!(report.entries().len(), 2);
        assert_eq!(report.entries()[0].subject, "Sindbad");
        assert!(report.has_failures());
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn warnings_and_skips_are_not_failures() {
        let mut report = FlowReport::new();
        report.record("A", FlowAction::Pull, StatusKind::Skipped, "declined");
        report.record("B", FlowAction::Configure, StatusKind::Warning, "unconfigured");
        assert!(!report.has_failures());
    }

    #[test]
    fn find_matches_subject_and_action() {
        let mut report = FlowReport::new();
        report.record("A", FlowAction::Clone, StatusKind::Success, "cloned");
        report.record("A", FlowAction::Develop, StatusKind::Failed, "boom");

        assert_eq!(
            report.find("A", FlowAction::Develop).unwrap().status,
            StatusKind::Failed
        );
        assert!(report.find("A", FlowAction::Pull).is_none());
    }

    #[test]
    fn rows_include_action() {
        let mut report = FlowReport::new();
        report.record("A", FlowAction::Remove, StatusKind::Success, "not registered");
        let rows = report.rows();
        assert_eq!(rows[0].detail, "rm: not registered");
    }
}
