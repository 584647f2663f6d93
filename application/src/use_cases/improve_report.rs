//! Improve Report use case.
//!
//! Revises an existing report in place from free-text notes.

use super::execute_request::{ExecuteError, Generation, KeySelection, RequestExecutor};
use crate::ports::progress::ProgressNotifier;
use crate::ports::report_store::{ReportStore, ReportStoreError};
use delegate_domain::core::string::truncate;
use delegate_domain::{CredentialNumber, PromptTemplate, ReportKind};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while improving a report
#[derive(Error, Debug)]
pub enum ImproveReportError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read report: {0}")]
    Read(#[source] ReportStoreError),

    #[error("Improvement request failed: {0}")]
    Request(#[from] ExecuteError),

    #[error("Failed to save improved report: {0}")]
    Write(#[source] ReportStoreError),
}

/// An improved report
#[derive(Debug, Clone, Serialize)]
pub struct ImproveOutput {
    pub path: PathBuf,
    #[serde(skip)]
    pub text: String,
    pub credential: CredentialNumber,
    pub attempts: usize,
}

/// Read the report at `path`, request a revision and overwrite the file
/// with the raw revised text.
pub(crate) async fn revise_report(
    executor: &RequestExecutor,
    reports: &dyn ReportStore,
    path: &Path,
    notes: &str,
    kind: ReportKind,
    progress: &dyn ProgressNotifier,
) -> Result<Generation, ImproveReportError> {
    if !reports.exists(path) {
        return Err(ImproveReportError::NotFound(path.to_path_buf()));
    }
    let existing = reports.read(path).map_err(|e| match e {
        ReportStoreError::NotFound(path) => ImproveReportError::NotFound(path),
        other => ImproveReportError::Read(other),
    })?;
    debug!(
        "Revising {} ({} chars) with notes: {}",
        path.display(),
        existing.len(),
        truncate(notes, 80)
    );

    let prompt = PromptTemplate::revision(kind, &existing, notes);
    let generation = executor
        .execute(&prompt, KeySelection::Rotate, progress)
        .await?;

    reports
        .write(path, &generation.text)
        .map_err(ImproveReportError::Write)?;
    Ok(generation)
}

/// Use case for improving a research report.
pub struct ImproveReportUseCase {
    executor: Arc<RequestExecutor>,
    reports: Arc<dyn ReportStore>,
}

impl ImproveReportUseCase {
    pub fn new(executor: Arc<RequestExecutor>, reports: Arc<dyn ReportStore>) -> Self {
        Self { executor, reports }
    }

    pub async fn execute(
        &self,
        notes: &str,
        path: &Path,
        progress: &dyn ProgressNotifier,
    ) -> Result<ImproveOutput, ImproveReportError> {
        info!("Improving {}", path.display());
        progress.on_run_start(&format!("Improving {}", path.display()));

        let result = revise_report(
            &self.executor,
            self.reports.as_ref(),
            path,
            notes,
            ReportKind::Research,
            progress,
        )
        .await;
        progress.on_run_complete();

        let generation = result?;
        info!("Updated {} (key {})", path.display(), generation.credential);
        Ok(ImproveOutput {
            path: path.to_path_buf(),
            text: generation.text,
            credential: generation.credential,
            attempts: generation.attempts,
        })
    }
}
