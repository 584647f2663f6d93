//! Report documents written to the output directory.

use crate::core::model::Model;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Timestamp format used in report headers
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const FOOTER: &str = "*Report generated by gemini-delegate*";

/// Kind of report, which decides its title and file suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Single-shot research on a topic
    Research,
    /// Output of one delegated agent
    Task,
}

impl ReportKind {
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Research => "Research Report",
            ReportKind::Task => "Task Completion Report",
        }
    }

    /// Header label for the subject line
    pub fn subject_label(&self) -> &'static str {
        match self {
            ReportKind::Research => "Topic",
            ReportKind::Task => "Task",
        }
    }

    pub fn section_heading(&self) -> &'static str {
        match self {
            ReportKind::Research => "Research Findings",
            ReportKind::Task => "Task Results",
        }
    }

    /// Upper-case suffix used in report file names
    pub fn file_suffix(&self) -> &'static str {
        match self {
            ReportKind::Research => "RESEARCH",
            ReportKind::Task => "TASK",
        }
    }
}

/// A report as first written, before any improvement overwrites it
#[derive(Debug, Clone)]
pub struct Report {
    kind: ReportKind,
    subject: String,
    model: Model,
    generated_at: DateTime<Local>,
    body: String,
}

impl Report {
    pub fn new(
        kind: ReportKind,
        subject: impl Into<String>,
        model: Model,
        body: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            subject: subject.into(),
            model,
            generated_at: Local::now(),
            body: body.into(),
        }
    }

    /// Override the generation time (tests, replays)
    pub fn with_timestamp(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Render the full markdown document
    pub fn render(&self) -> String {
        format!(
            "# {title}\n**{label}:** {subject}\n**Generated:** {at}\n**Model:** {model}\n\n---\n\n## {heading}\n\n{body}\n\n---\n\n{FOOTER}\n",
            title = self.kind.title(),
            label = self.kind.subject_label(),
            subject = self.subject,
            at = self.generated_at.format(TIMESTAMP_FORMAT),
            model = self.model,
            heading = self.kind.section_heading(),
            body = self.body,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_research_report_layout() {
        let report = Report::new(
            ReportKind::Research,
            "quantum error correction",
            Model::default(),
            "Surface codes dominate.",
        )
        .with_timestamp(fixed_time());

        let rendered = report.render();
        assert!(rendered.starts_with("# Research Report\n**Topic:** quantum error correction\n"));
        assert!(rendered.contains("**Generated:** 2025-03-14 09:26:53"));
        assert!(rendered.contains("**Model:** gemini-2.5-pro"));
        assert!(rendered.contains("## Research Findings\n\nSurface codes dominate.\n"));
        assert!(rendered.trim_end().ends_with(FOOTER));
    }

    #[test]
    fn test_task_report_layout() {
        let report = Report::new(ReportKind::Task, "ship it", Model::Gemini25Flash, "done")
            .with_timestamp(fixed_time());

        let rendered = report.render();
        assert!(rendered.starts_with("# Task Completion Report\n**Task:** ship it\n"));
        assert!(rendered.contains("## Task Results\n\ndone"));
        assert!(rendered.contains("**Model:** gemini-2.5-flash"));
    }

    #[test]
    fn test_file_suffixes() {
        assert_eq!(ReportKind::Research.file_suffix(), "RESEARCH");
        assert_eq!(ReportKind::Task.file_suffix(), "TASK");
    }
}
