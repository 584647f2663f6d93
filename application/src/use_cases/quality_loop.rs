//! Quality-gated improvement loop for one agent.
//!
//! An agent produces an initial answer on its assigned credential, saves it
//! as a task report, then alternates assessment and revision rounds until
//! the score clears the gate or the iteration cap is hit. Assessment and
//! revision requests always rotate.

use super::execute_request::{KeySelection, RequestExecutor};
use super::improve_report::revise_report;
use crate::config::ExecutionParams;
use crate::ports::progress::ProgressNotifier;
use crate::ports::report_store::ReportStore;
use delegate_domain::{
    AgentOutcome, Assessment, CredentialNumber, IterationState, LoopDecision, PromptTemplate,
    Report, ReportKind, StopReason, report_file_name,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// What one agent works on
#[derive(Debug, Clone, Copy)]
pub struct AgentAssignment<'a> {
    /// 1-based agent number
    pub agent: usize,
    /// Number of agents in the run
    pub total: usize,
    /// Prompt the agent answers
    pub prompt: &'a str,
    /// Task answers are assessed against
    pub original_task: &'a str,
    /// Credential for the initial request
    pub credential: CredentialNumber,
    pub max_iterations: usize,
}

/// Runs agents through `Init -> Assessing -> (Improving -> Assessing)* -> Done`.
pub struct QualityLoop {
    executor: Arc<RequestExecutor>,
    reports: Arc<dyn ReportStore>,
    params: ExecutionParams,
}

impl QualityLoop {
    pub fn new(
        executor: Arc<RequestExecutor>,
        reports: Arc<dyn ReportStore>,
        params: ExecutionParams,
    ) -> Self {
        Self {
            executor,
            reports,
            params,
        }
    }

    /// Run one agent to a terminal state; never fails the caller
    pub async fn run(
        &self,
        assignment: AgentAssignment<'_>,
        progress: &dyn ProgressNotifier,
    ) -> AgentOutcome {
        progress.on_agent_start(assignment.agent, assignment.total, assignment.credential);
        let outcome = self.run_agent(assignment, progress).await;
        progress.on_agent_complete(&outcome);
        outcome
    }

    async fn run_agent(
        &self,
        assignment: AgentAssignment<'_>,
        progress: &dyn ProgressNotifier,
    ) -> AgentOutcome {
        let AgentAssignment {
            agent,
            prompt,
            credential,
            ..
        } = assignment;

        let initial = match self
            .executor
            .execute(prompt, KeySelection::Pinned(credential), progress)
            .await
        {
            Ok(generation) => generation,
            Err(e) => {
                warn!("[Agent {}] Failed: {}", agent, e);
                return AgentOutcome::failed(agent, prompt, credential, e.to_string());
            }
        };
        info!(
            "[Agent {}] Initial completion using key {}",
            agent, initial.credential
        );

        let path = self
            .params
            .output_dir
            .join(report_file_name(credential, prompt, ReportKind::Task));
        let report = Report::new(
            ReportKind::Task,
            prompt,
            self.executor.model().clone(),
            &initial.text,
        );
        if let Err(e) = self.reports.write(&path, &report.render()) {
            warn!("[Agent {}] Failed to create task report: {}", agent, e);
            return AgentOutcome::failed(agent, prompt, credential, e.to_string());
        }

        let gate = self.params.quality_gate();
        let mut state = IterationState::start(initial.text, assignment.max_iterations);

        loop {
            let assessment = self
                .assess(state.answer(), assignment.original_task, progress)
                .await;
            info!(
                "[Agent {}] Iteration {} quality: {}/10",
                agent,
                state.iteration(),
                assessment.score
            );
            progress.on_assessment(agent, state.iteration(), assessment.score);

            if let LoopDecision::Done(reason) = state.record_assessment(assessment.score, &gate) {
                match reason {
                    StopReason::ThresholdMet => info!("[Agent {}] Quality threshold met", agent),
                    _ => info!("[Agent {}] Max iterations reached", agent),
                }
                return self.completed(assignment, &path, &state, reason);
            }

            progress.on_revision(agent, state.iteration() + 1);
            match revise_report(
                &self.executor,
                self.reports.as_ref(),
                &path,
                &assessment.improvements,
                ReportKind::Task,
                progress,
            )
            .await
            {
                Ok(generation) => {
                    state.record_revision(generation.text);
                    info!(
                        "[Agent {}] Iteration {} improvement completed",
                        agent,
                        state.iteration()
                    );
                }
                Err(e) => {
                    warn!("[Agent {}] Improvement failed: {}", agent, e);
                    return self.completed(assignment, &path, &state, StopReason::ImprovementFailed);
                }
            }
        }
    }

    /// Score `answer` against the original task; a failed request counts as
    /// the default score with generic notes
    async fn assess(
        &self,
        answer: &str,
        original_task: &str,
        progress: &dyn ProgressNotifier,
    ) -> Assessment {
        let prompt = PromptTemplate::assessment(answer, original_task);
        match self
            .executor
            .execute(&prompt, KeySelection::Rotate, progress)
            .await
        {
            Ok(generation) => {
                let assessment = Assessment::parse(&generation.text);
                if !assessment.score_parsed {
                    warn!(
                        "No score in assessment reply, using default {}",
                        assessment.score
                    );
                }
                assessment
            }
            Err(e) => {
                warn!("Assessment failed, using default score: {}", e);
                Assessment::unavailable()
            }
        }
    }

    fn completed(
        &self,
        assignment: AgentAssignment<'_>,
        path: &Path,
        state: &IterationState,
        reason: StopReason,
    ) -> AgentOutcome {
        AgentOutcome::completed(
            assignment.agent,
            assignment.prompt,
            assignment.credential,
            path.to_path_buf(),
            state.score(),
            state.iteration(),
            reason,
        )
    }
}
