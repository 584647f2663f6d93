//! Console output formatter for research, improve and delegation results

use colored::Colorize;
use delegate_application::{ImproveOutput, ResearchOutput};
use delegate_domain::core::string::truncate;
use delegate_domain::{AgentStatus, DelegationResult, StopReason};
use serde::Serialize;

/// Formats run results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a saved research report
    pub fn format_research(output: &ResearchOutput, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} Research completed (key {}, {} attempt{})\n",
            "v".green().bold(),
            output.credential,
            output.attempts,
            plural(output.attempts)
        ));
        out.push_str(&Self::field("File:", &output.path.display().to_string()));
        out.push_str(&Self::field("Name:", &output.file_name));
        if verbose {
            out.push_str(&Self::preview(&output.text));
        }
        out
    }

    /// Format an improved report
    pub fn format_improve(output: &ImproveOutput, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} File improved (key {}, {} attempt{})\n",
            "v".green().bold(),
            output.credential,
            output.attempts,
            plural(output.attempts)
        ));
        out.push_str(&Self::field("Updated:", &output.path.display().to_string()));
        if verbose {
            out.push_str(&Self::preview(&output.text));
        }
        out
    }

    /// Format the outcome of a delegation or orchestration run
    pub fn format_delegation(result: &DelegationResult, verbose: bool) -> String {
        let mut out = String::new();

        out.push_str(&Self::header("Delegation Results"));
        out.push('\n');
        out.push_str(&Self::field("Task:", &result.task));
        out.push_str(&Self::field("Agents:", &result.agent_count.to_string()));
        if result.is_partial() {
            out.push_str(&format!(
                "{} Partial success: {} of {} agent(s) completed\n",
                "!".yellow().bold(),
                result.successful().count(),
                result.outcomes.len()
            ));
        }

        let successful: Vec<_> = result.successful().collect();
        if !successful.is_empty() {
            out.push_str(&Self::section_header(&format!(
                "Completed ({})",
                successful.len()
            )));
            for outcome in &successful {
                if let AgentStatus::Completed {
                    final_quality,
                    iterations,
                    stop_reason,
                    ..
                } = &outcome.status
                {
                    out.push_str(&format!(
                        "  {} Agent {}: {} (quality {}/10, iterations {}, {})\n",
                        "v".green(),
                        outcome.agent,
                        outcome.file_name().unwrap_or_default().bold(),
                        final_quality,
                        iterations,
                        stop_reason_label(*stop_reason)
                    ));
                }
            }
        }

        let failed: Vec<_> = result.failed().collect();
        if !failed.is_empty() {
            out.push_str(&Self::section_header(&format!("Failed ({})", failed.len())));
            for outcome in &failed {
                if let AgentStatus::Failed { error } = &outcome.status {
                    out.push_str(&format!(
                        "  {} Agent {} (key {}): {}\n",
                        "x".red(),
                        outcome.agent,
                        outcome.credential,
                        error
                    ));
                }
            }
        }

        if verbose && !successful.is_empty() {
            out.push_str(&Self::section_header("Agent Tasks"));
            for outcome in &successful {
                out.push_str(&format!(
                    "  Agent {}: {}\n",
                    outcome.agent,
                    truncate(&outcome.task, 100)
                ));
            }
        }

        out.push_str(&Self::footer());
        out
    }

    /// Format any result as JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a fatal or single-shot failure
    pub fn format_error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    fn field(label: &str, value: &str) -> String {
        format!("{} {}\n", label.cyan().bold(), value)
    }

    fn preview(text: &str) -> String {
        format!("\n{}\n{}\n", "Response:".cyan().bold(), truncate(text, 200))
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

fn stop_reason_label(reason: StopReason) -> &'static str {
    match reason {
        StopReason::ThresholdMet => "threshold met",
        StopReason::IterationCap => "iteration cap",
        StopReason::ImprovementFailed => "improvement failed",
    }
}
