//! Delegation value objects - per-agent outcomes and the aggregated result.

use crate::credential::CredentialNumber;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Why an agent's improvement loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Quality score reached the threshold
    ThresholdMet,
    /// Assessment rounds reached the cap
    IterationCap,
    /// A revision could not be produced or saved
    ImprovementFailed,
}

/// Terminal status of one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum AgentStatus {
    Completed {
        report: PathBuf,
        final_quality: f64,
        iterations: usize,
        stop_reason: StopReason,
    },
    Failed {
        error: String,
    },
}

/// Outcome of one agent in a delegation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOutcome {
    /// 1-based agent number
    pub agent: usize,
    /// Variant prompt the agent worked on
    pub task: String,
    /// Credential pinned for the agent's initial request
    pub credential: CredentialNumber,
    #[serde(flatten)]
    pub status: AgentStatus,
}

impl AgentOutcome {
    pub fn completed(
        agent: usize,
        task: impl Into<String>,
        credential: CredentialNumber,
        report: PathBuf,
        final_quality: f64,
        iterations: usize,
        stop_reason: StopReason,
    ) -> Self {
        Self {
            agent,
            task: task.into(),
            credential,
            status: AgentStatus::Completed {
                report,
                final_quality,
                iterations,
                stop_reason,
            },
        }
    }

    pub fn failed(
        agent: usize,
        task: impl Into<String>,
        credential: CredentialNumber,
        error: impl Into<String>,
    ) -> Self {
        Self {
            agent,
            task: task.into(),
            credential,
            status: AgentStatus::Failed {
                error: error.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, AgentStatus::Completed { .. })
    }

    /// Report file name, for completed agents
    pub fn file_name(&self) -> Option<String> {
        match &self.status {
            AgentStatus::Completed { report, .. } => report
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            AgentStatus::Failed { .. } => None,
        }
    }
}

/// Aggregated result of a delegation or orchestration run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegationResult {
    /// The original, unvaried task
    pub task: String,
    pub agent_count: usize,
    /// Outcomes ordered by agent number
    pub outcomes: Vec<AgentOutcome>,
}

impl DelegationResult {
    pub fn new(task: impl Into<String>, agent_count: usize, mut outcomes: Vec<AgentOutcome>) -> Self {
        outcomes.sort_by_key(|o| o.agent);
        Self {
            task: task.into(),
            agent_count,
            outcomes,
        }
    }

    pub fn successful(&self) -> impl Iterator<Item = &AgentOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &AgentOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// True when at least one agent failed but not all
    pub fn is_partial(&self) -> bool {
        let ok = self.successful().count();
        ok > 0 && ok < self.outcomes.len()
    }
}
