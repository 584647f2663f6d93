//! Delegate Task use case.
//!
//! Fans one task out to several agents, each running the quality loop on
//! its own prompt with its own credential. Agents run one after another and
//! a failing agent never stops the rest.
//!
//! Two flavors share the machinery:
//!
//! - **delegate**: every agent answers a different angle of the task
//! - **orchestrate**: every agent answers the unmodified task, giving
//!   independent answers to compare

use super::execute_request::RequestExecutor;
use super::quality_loop::{AgentAssignment, QualityLoop};
use crate::config::ExecutionParams;
use crate::ports::progress::ProgressNotifier;
use crate::ports::report_store::ReportStore;
use delegate_domain::core::string::truncate;
use delegate_domain::{
    CredentialAssignment, DelegationResult, DomainError, Task, task_variants,
    validate_agent_count, validate_iterations,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that prevent a delegation from starting
#[derive(Error, Debug)]
pub enum DelegateError {
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Input for [`DelegateTaskUseCase::delegate`]
#[derive(Debug, Clone)]
pub struct DelegateTaskInput {
    pub task: Task,
    pub agent_count: usize,
    pub max_iterations: usize,
    pub assignment: CredentialAssignment,
}

impl DelegateTaskInput {
    pub fn new(task: Task, agent_count: usize, max_iterations: usize) -> Self {
        Self {
            task,
            agent_count,
            max_iterations,
            assignment: CredentialAssignment::Auto,
        }
    }

    pub fn with_assignment(mut self, assignment: CredentialAssignment) -> Self {
        self.assignment = assignment;
        self
    }
}

/// Use case for delegating and orchestrating tasks across agents.
pub struct DelegateTaskUseCase {
    executor: Arc<RequestExecutor>,
    quality_loop: QualityLoop,
}

impl DelegateTaskUseCase {
    pub fn new(
        executor: Arc<RequestExecutor>,
        reports: Arc<dyn ReportStore>,
        params: ExecutionParams,
    ) -> Self {
        Self {
            quality_loop: QualityLoop::new(executor.clone(), reports, params),
            executor,
        }
    }

    /// Split the task into one variant per agent and run them all
    pub async fn delegate(
        &self,
        input: DelegateTaskInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<DelegationResult, DelegateError> {
        let agent_count = validate_agent_count(input.agent_count)?;
        let max_iterations = validate_iterations(input.max_iterations)?;

        info!(
            "Starting task delegation: {}",
            truncate(input.task.content(), 100)
        );
        info!(
            "Spawning {} agent(s), max {} iterations each",
            agent_count, max_iterations
        );

        let prompts = task_variants(input.task.content(), agent_count);
        Ok(self
            .run_agents(&input.task, prompts, max_iterations, input.assignment, progress)
            .await)
    }

    /// Run `agent_count` agents on the unmodified task
    pub async fn orchestrate(
        &self,
        task: &Task,
        agent_count: usize,
        max_iterations: usize,
        progress: &dyn ProgressNotifier,
    ) -> Result<DelegationResult, DelegateError> {
        let agent_count = validate_agent_count(agent_count)?;
        let max_iterations = validate_iterations(max_iterations)?;

        info!(
            "Orchestrating {} agent(s) on: {}",
            agent_count,
            truncate(task.content(), 100)
        );

        let prompts = vec![task.content().to_string(); agent_count];
        Ok(self
            .run_agents(task, prompts, max_iterations, CredentialAssignment::Auto, progress)
            .await)
    }

    async fn run_agents(
        &self,
        task: &Task,
        prompts: Vec<String>,
        max_iterations: usize,
        assignment: CredentialAssignment,
        progress: &dyn ProgressNotifier,
    ) -> DelegationResult {
        let total = prompts.len();
        let rotator = self.executor.rotator();
        let snapshot = rotator.cursor();

        progress.on_run_start(&format!(
            "Delegating to {} agent(s): {}",
            total,
            truncate(task.content(), 60)
        ));

        let mut outcomes = Vec::with_capacity(total);
        for (index, prompt) in prompts.iter().enumerate() {
            let credential = assignment.for_agent(index, &snapshot);
            info!("[Agent {}] Assigned key {}", index + 1, credential);

            let outcome = self
                .quality_loop
                .run(
                    AgentAssignment {
                        agent: index + 1,
                        total,
                        prompt,
                        original_task: task.content(),
                        credential,
                        max_iterations,
                    },
                    progress,
                )
                .await;
            outcomes.push(outcome);
        }

        if assignment.advances_cursor() {
            let next = rotator.advance_by(snapshot, total);
            info!("Key index advanced to {}", next.cursor());
        }

        progress.on_run_complete();
        DelegationResult::new(task.content(), total, outcomes)
    }
}
