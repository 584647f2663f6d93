//! Progress reporting for research, improve and delegation runs

use colored::Colorize;
use delegate_application::{GatewayError, ProgressNotifier};
use delegate_domain::{AgentOutcome, AgentStatus, CredentialNumber};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with an indicatif spinner
pub struct ProgressReporter {
    multi: MultiProgress,
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.spinner.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }

    fn println(&self, line: String) {
        if self.multi.println(&line).is_err() {
            println!("{}", line);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_run_start(&self, description: &str) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(description.to_string());
        pb.set_message("Starting...");
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut guard) = self.spinner.lock() {
            *guard = Some(pb);
        }
    }

    fn on_agent_start(&self, agent: usize, total: usize, credential: CredentialNumber) {
        self.with_spinner(|pb| {
            pb.set_message(format!("Agent {}/{} on key {}", agent, total, credential));
        });
    }

    fn on_agent_complete(&self, outcome: &AgentOutcome) {
        self.println(agent_line(outcome));
    }

    fn on_run_complete(&self) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_and_clear();
        }
    }

    fn on_attempt_failed(&self, attempt: usize, credential: CredentialNumber, error: &GatewayError) {
        self.with_spinner(|pb| {
            pb.set_message(format!(
                "Attempt {} on key {} failed ({}), retrying",
                attempt, credential, error
            ));
        });
    }

    fn on_assessment(&self, agent: usize, iteration: usize, score: f64) {
        self.with_spinner(|pb| {
            pb.set_message(format!(
                "Agent {} iteration {}: quality {}/10",
                agent, iteration, score
            ));
        });
    }

    fn on_revision(&self, agent: usize, iteration: usize) {
        self.with_spinner(|pb| {
            pb.set_message(format!("Agent {} revising (iteration {})", agent, iteration));
        });
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_run_start(&self, description: &str) {
        println!("{} {}", "->".cyan(), description.bold());
    }

    fn on_agent_start(&self, agent: usize, total: usize, credential: CredentialNumber) {
        println!(
            "{} Agent {}/{} on key {}",
            "->".cyan(),
            agent,
            total,
            credential
        );
    }

    fn on_agent_complete(&self, outcome: &AgentOutcome) {
        println!("{}", agent_line(outcome));
    }

    fn on_run_complete(&self) {
        println!();
    }

    fn on_attempt_failed(&self, attempt: usize, credential: CredentialNumber, error: &GatewayError) {
        println!(
            "  {} attempt {} on key {}: {}",
            "!".yellow(),
            attempt,
            credential,
            error
        );
    }

    fn on_assessment(&self, agent: usize, iteration: usize, score: f64) {
        println!(
            "  Agent {} iteration {}: quality {}/10",
            agent, iteration, score
        );
    }
}

fn agent_line(outcome: &AgentOutcome) -> String {
    match &outcome.status {
        AgentStatus::Completed {
            final_quality,
            iterations,
            ..
        } => format!(
            "  {} Agent {} done (quality {}/10 after {} iteration{})",
            "v".green(),
            outcome.agent,
            final_quality,
            iterations,
            if *iterations == 1 { "" } else { "s" }
        ),
        AgentStatus::Failed { error } => {
            format!("  {} Agent {} failed: {}", "x".red(), outcome.agent, error)
        }
    }
}
