//! Prompt templates for assessment and revision requests

use crate::quality::{IMPROVEMENTS_MARKER, SCORE_MARKER};
use crate::report::ReportKind;

fn noun(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Research => "research report",
        ReportKind::Task => "task completion report",
    }
}

fn content_label(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Research => "EXISTING RESEARCH CONTENT",
        ReportKind::Task => "EXISTING TASK CONTENT",
    }
}

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Ask for a 1-10 score of `result` against the original task.
    ///
    /// The reply format is what [`crate::quality::Assessment::parse`] reads.
    pub fn assessment(result: &str, original_task: &str) -> String {
        format!(
            r#"Please assess the quality of this task completion on a scale of 1-10 based on the following criteria:

TASK COMPLETION (40% weight):
- Addresses all aspects of the request
- Provides actionable outputs
- Clear structure and organization

ACCURACY & RELEVANCE (30% weight):
- Factually correct information
- Directly relevant to task
- No contradictions

PRACTICAL VALUE (30% weight):
- Implementable solutions
- Real-world applicability
- Clear next steps

ORIGINAL TASK: {original_task}

TASK RESULT TO ASSESS:
{result}

Please provide:
1. A numerical score from 1-10
2. Brief explanation of the score
3. Specific areas for improvement if score < 7

Format your response as:
{SCORE_MARKER} [number]
EXPLANATION: [brief explanation]
{IMPROVEMENTS_MARKER} [specific improvements needed, or "None" if score >= 7]"#
        )
    }

    /// Ask for a complete rewrite of an existing report addressing `notes`
    pub fn revision(kind: ReportKind, existing: &str, notes: &str) -> String {
        let noun = noun(kind);
        let label = content_label(kind);
        format!(
            r#"You are tasked with improving an existing {noun}.

{label}:
{existing}

IMPROVEMENT POINTS TO ADDRESS:
{notes}

INSTRUCTIONS:
1. Read and understand the existing content above
2. Address the specific improvement points mentioned
3. Enhance the existing work while maintaining the overall structure
4. Keep the same markdown format with the header information
5. Provide the complete improved {noun}

Please provide the complete improved {noun}:"#
        )
    }
}
