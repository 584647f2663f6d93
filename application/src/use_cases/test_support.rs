//! Test doubles shared by the use case tests.

use super::credential_rotator::CredentialRotator;
use super::execute_request::RequestExecutor;
use crate::ports::generation_gateway::{GatewayError, GenerationGateway};
use crate::ports::report_store::{ReportStore, ReportStoreError};
use crate::ports::rotation_store::{RotationStore, RotationStoreError};
use async_trait::async_trait;
use delegate_domain::{Credential, CredentialNumber, CredentialPool, Model, RetryPolicy};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Process-local rotation store
#[derive(Debug, Default)]
pub struct InMemoryRotationStore {
    cursor: Mutex<Option<usize>>,
}

impl InMemoryRotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cursor(cursor: usize) -> Self {
        Self {
            cursor: Mutex::new(Some(cursor)),
        }
    }
}

impl RotationStore for InMemoryRotationStore {
    fn load(&self) -> Option<usize> {
        *self.cursor.lock().unwrap()
    }

    fn save(&self, cursor: usize) -> Result<(), RotationStoreError> {
        *self.cursor.lock().unwrap() = Some(cursor);
        Ok(())
    }
}

/// One request seen by [`ScriptedGateway`]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub credential: String,
    pub prompt: String,
    pub timeout: Duration,
}

/// Gateway that replays canned outcomes in order
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedGateway {
    pub fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationGateway for ScriptedGateway {
    async fn generate(
        &self,
        _model: &Model,
        credential: &Credential,
        prompt: &str,
        timeout: Duration,
    ) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(RecordedCall {
            credential: credential.expose().to_string(),
            prompt: prompt.to_string(),
            timeout,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Transport("No more responses".to_string())))
    }
}

/// Report store backed by a map, with switchable failures
#[derive(Default)]
pub struct MemoryReportStore {
    files: Mutex<HashMap<PathBuf, String>>,
    writes: Mutex<Vec<PathBuf>>,
    fail_writes_after: Mutex<Option<usize>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, contents: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), contents.to_string());
        self
    }

    /// Allow `count` successful writes, then fail every later one
    pub fn failing_writes_after(self, count: usize) -> Self {
        *self.fail_writes_after.lock().unwrap() = Some(count);
        self
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self.files.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Every successful write, in order
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.lock().unwrap().clone()
    }
}

impl ReportStore for MemoryReportStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<String, ReportStoreError> {
        self.contents(path)
            .ok_or_else(|| ReportStoreError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), ReportStoreError> {
        let mut writes = self.writes.lock().unwrap();
        if let Some(limit) = *self.fail_writes_after.lock().unwrap()
            && writes.len() >= limit
        {
            return Err(ReportStoreError::Write {
                path: path.to_path_buf(),
                source: std::io::Error::other("disk full"),
            });
        }
        writes.push(path.to_path_buf());
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// Rotator over `key-1..=key-{size}`
pub fn rotator_with(
    size: usize,
    store: Arc<dyn RotationStore>,
    override_number: Option<CredentialNumber>,
) -> Arc<CredentialRotator> {
    let pool = CredentialPool::from_secrets((1..=size).map(|i| format!("key-{i}"))).unwrap();
    Arc::new(CredentialRotator::new(pool, store).with_override(override_number))
}

/// Executor whose retries stop after a few attempts so scripts cannot hang
pub fn bounded_executor(
    gateway: Arc<ScriptedGateway>,
    rotator: Arc<CredentialRotator>,
) -> Arc<RequestExecutor> {
    Arc::new(
        RequestExecutor::new(gateway, rotator, Model::default())
            .with_policy(RetryPolicy::default().with_max_attempts(Some(3))),
    )
}

/// Assessment reply with the given score and notes
pub fn assessment_reply(score: f64, improvements: &str) -> Result<String, GatewayError> {
    Ok(format!(
        "SCORE: {score}\nEXPLANATION: scripted\nIMPROVEMENTS: {improvements}"
    ))
}
