//! Credential assignment for delegated agents.

use crate::core::error::DomainError;
use crate::credential::{CredentialNumber, RotationState};
use serde::{Deserialize, Serialize};

/// Largest fan-out accepted for one task
pub const MAX_AGENTS: usize = 8;

/// Largest assessment-round cap accepted per agent
pub const MAX_ITERATIONS: usize = 10;

pub fn validate_agent_count(agent_count: usize) -> Result<usize, DomainError> {
    if (1..=MAX_AGENTS).contains(&agent_count) {
        Ok(agent_count)
    } else {
        Err(DomainError::InvalidAgentCount(agent_count))
    }
}

pub fn validate_iterations(max_iterations: usize) -> Result<usize, DomainError> {
    if (1..=MAX_ITERATIONS).contains(&max_iterations) {
        Ok(max_iterations)
    } else {
        Err(DomainError::InvalidIterations(max_iterations))
    }
}

/// How agents of one run obtain the credential for their own requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "key")]
pub enum CredentialAssignment {
    /// Agent `i` takes the `i`-th credential after the cursor snapshot;
    /// the cursor moves past the whole batch once the run ends.
    Auto,
    /// Every agent uses the same pre-assigned credential and the shared
    /// cursor is left alone.
    Fixed(CredentialNumber),
}

impl CredentialAssignment {
    /// Credential for the agent at `index` (0-based)
    pub fn for_agent(&self, index: usize, snapshot: &RotationState) -> CredentialNumber {
        match self {
            CredentialAssignment::Auto => snapshot.nth(index),
            CredentialAssignment::Fixed(number) => *number,
        }
    }

    /// Whether the run ends with a batch cursor update
    pub fn advances_cursor(&self) -> bool {
        matches!(self, CredentialAssignment::Auto)
    }
}
