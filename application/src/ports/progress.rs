//! Progress notification port
//!
//! Defines the interface for reporting progress while requests, agents and
//! improvement rounds run.

use super::generation_gateway::GatewayError;
use delegate_domain::{AgentOutcome, CredentialNumber};

/// Callback for progress updates during a run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain lines, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a research, improve or delegation run starts
    fn on_run_start(&self, description: &str);

    /// Called when an agent starts working on its variant
    fn on_agent_start(&self, agent: usize, total: usize, credential: CredentialNumber);

    /// Called when an agent reaches a terminal state
    fn on_agent_complete(&self, outcome: &AgentOutcome);

    /// Called when the run finishes
    fn on_run_complete(&self);

    /// Called for every failed attempt that will be retried
    fn on_attempt_failed(
        &self,
        _attempt: usize,
        _credential: CredentialNumber,
        _error: &GatewayError,
    ) {
    }

    /// Called after each assessment round
    fn on_assessment(&self, _agent: usize, _iteration: usize, _score: f64) {}

    /// Called before a revision request is sent
    fn on_revision(&self, _agent: usize, _iteration: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_run_start(&self, _description: &str) {}
    fn on_agent_start(&self, _agent: usize, _total: usize, _credential: CredentialNumber) {}
    fn on_agent_complete(&self, _outcome: &AgentOutcome) {}
    fn on_run_complete(&self) {}
}
