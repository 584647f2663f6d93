//! Run Research use case.
//!
//! Sends a topic once and saves the answer as a research report named after
//! the credential that produced it.

use super::execute_request::{ExecuteError, KeySelection, RequestExecutor};
use crate::config::ExecutionParams;
use crate::ports::progress::ProgressNotifier;
use crate::ports::report_store::{ReportStore, ReportStoreError};
use delegate_domain::core::string::truncate;
use delegate_domain::{CredentialNumber, Report, ReportKind, Task, report_file_name};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur during research
#[derive(Error, Debug)]
pub enum RunResearchError {
    #[error("Research request failed: {0}")]
    Request(#[from] ExecuteError),

    #[error("Failed to save research report: {0}")]
    Save(#[from] ReportStoreError),
}

/// A saved research report
#[derive(Debug, Clone, Serialize)]
pub struct ResearchOutput {
    pub path: PathBuf,
    pub file_name: String,
    /// Raw answer text
    #[serde(skip)]
    pub text: String,
    /// Number used in the file name
    pub agent: CredentialNumber,
    /// Credential that produced the answer
    pub credential: CredentialNumber,
    pub attempts: usize,
}

/// Use case for single-shot research.
pub struct RunResearchUseCase {
    executor: Arc<RequestExecutor>,
    reports: Arc<dyn ReportStore>,
    params: ExecutionParams,
}

impl RunResearchUseCase {
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

    /// Research `topic` and write the report.
    ///
    /// The file is numbered after the run's override when one is set,
    /// otherwise after the credential that finally answered.
    pub async fn execute(
        &self,
        topic: &Task,
        progress: &dyn ProgressNotifier,
    ) -> Result<ResearchOutput, RunResearchError> {
        info!("Starting research: {}", truncate(topic.content(), 100));
        progress.on_run_start(&format!("Researching: {}", truncate(topic.content(), 60)));

        let result = self.research(topic, progress).await;
        progress.on_run_complete();
        result
    }

    async fn research(
        &self,
        topic: &Task,
        progress: &dyn ProgressNotifier,
    ) -> Result<ResearchOutput, RunResearchError> {
        let generation = self
            .executor
            .execute(topic.content(), KeySelection::Default, progress)
            .await?;

        let agent = self
            .executor
            .rotator()
            .override_number()
            .unwrap_or(generation.credential);
        let file_name = report_file_name(agent, topic.content(), ReportKind::Research);
        let path = self.params.output_dir.join(&file_name);

        let report = Report::new(
            ReportKind::Research,
            topic.content(),
            self.executor.model().clone(),
            &generation.text,
        );
        self.reports.write(&path, &report.render())?;
        info!("Created research report {} (key {})", file_name, agent);

        Ok(ResearchOutput {
            path,
            file_name,
            text: generation.text,
            agent,
            credential: generation.credential,
            attempts: generation.attempts,
        })
    }
}
