//! Request executor.
//!
//! Sends one prompt and keeps retrying with the next credential until the
//! gateway answers or the [`RetryPolicy`] gives up. Each attempt uses the
//! next timeout in the policy's escalation cycle.

use super::credential_rotator::CredentialRotator;
use crate::ports::generation_gateway::{GatewayError, GenerationGateway};
use crate::ports::progress::ProgressNotifier;
use delegate_domain::core::string::truncate;
use delegate_domain::{CredentialNumber, Model, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end a request without a generated answer
#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("Request rejected on key {credential}: {source}")]
    Rejected {
        credential: CredentialNumber,
        #[source]
        source: GatewayError,
    },

    #[error("Giving up after {attempts} attempts, last error: {last}")]
    Exhausted { attempts: usize, last: GatewayError },
}

/// How the first attempt of a request picks its credential.
///
/// Retries always rotate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySelection {
    /// Honor the run's override, otherwise rotate
    Default,
    /// Use this credential for the first attempt
    Pinned(CredentialNumber),
    /// Rotate on every attempt
    Rotate,
}

/// A successful generation
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub text: String,
    /// Credential that produced the answer
    pub credential: CredentialNumber,
    /// Attempts made, including the successful one
    pub attempts: usize,
    /// Timeout of the successful attempt
    pub timeout: Duration,
}

/// Executes generation requests with retry and credential rotation.
pub struct RequestExecutor {
    gateway: Arc<dyn GenerationGateway>,
    rotator: Arc<CredentialRotator>,
    policy: RetryPolicy,
    model: Model,
}

impl RequestExecutor {
    pub fn new(
        gateway: Arc<dyn GenerationGateway>,
        rotator: Arc<CredentialRotator>,
        model: Model,
    ) -> Self {
        Self {
            gateway,
            rotator,
            policy: RetryPolicy::default(),
            model,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn rotator(&self) -> &CredentialRotator {
        &self.rotator
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Send `prompt` until it succeeds or the policy stops retrying.
    ///
    /// With the default unbounded policy this only returns an error for a
    /// status the policy marks as non-recoverable.
    pub async fn execute(
        &self,
        prompt: &str,
        selection: KeySelection,
        progress: &dyn ProgressNotifier,
    ) -> Result<Generation, ExecuteError> {
        debug!(
            "Executing request ({} chars): {}",
            prompt.len(),
            truncate(prompt, 80)
        );

        let mut attempt = 0;
        loop {
            let (number, credential) = if attempt == 0 {
                match selection {
                    KeySelection::Default => self.rotator.select(),
                    KeySelection::Pinned(n) => self.rotator.select_fixed(n),
                    KeySelection::Rotate => self.rotator.select_rotating(),
                }
            } else {
                self.rotator.select_rotating()
            };
            let timeout = self.policy.timeout_for(attempt);

            match self
                .gateway
                .generate(&self.model, credential, prompt, timeout)
                .await
            {
                Ok(text) => {
                    info!(
                        "Request succeeded with key {} ({}) on attempt {}",
                        number,
                        credential.masked(),
                        attempt + 1
                    );
                    return Ok(Generation {
                        text,
                        credential: number,
                        attempts: attempt + 1,
                        timeout,
                    });
                }
                Err(error) => {
                    if let Some(status) = error.status()
                        && !self.policy.is_recoverable_status(status)
                    {
                        return Err(ExecuteError::Rejected {
                            credential: number,
                            source: error,
                        });
                    }

                    attempt += 1;
                    warn!(
                        "Attempt {}: {} (key {}), trying next key...",
                        attempt,
                        error,
                        credential.masked()
                    );
                    progress.on_attempt_failed(attempt, number, &error);

                    if !self.policy.allows_attempt(attempt) {
                        return Err(ExecuteError::Exhausted {
                            attempts: attempt,
                            last: error,
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use crate::ports::rotation_store::RotationStore;
    use crate::use_cases::test_support::InMemoryRotationStore;
    use crate::use_cases::test_support::{ScriptedGateway, rotator_with};

    fn executor(
        gateway: Arc<ScriptedGateway>,
        rotator: Arc<CredentialRotator>,
    ) -> RequestExecutor {
        RequestExecutor::new(gateway, rotator, Model::default())
    }

    fn number(n: usize) -> CredentialNumber {
        CredentialNumber::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_first_attempt_success() {
        let store = Arc::new(InMemoryRotationStore::with_cursor(1));
        let rotator = rotator_with(3, store.clone(), None);
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok("hello".into())]));

        let generation = executor(gateway.clone(), rotator)
            .execute("prompt", KeySelection::Default, &NoProgress)
            .await
            .unwrap();

        assert_eq!(generation.text, "hello");
        assert_eq!(generation.credential.get(), 1);
        assert_eq!(generation.attempts, 1);
        assert_eq!(generation.timeout, Duration::from_secs(60));
        assert_eq!(store.load(), Some(2));
    }

    #[tokio::test]
    async fn test_retries_rotate_and_escalate_timeouts() {
        let store = Arc::new(InMemoryRotationStore::with_cursor(1));
        let rotator = rotator_with(3, store.clone(), None);
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Err(GatewayError::RateLimited { status: 403 }),
            Err(GatewayError::InvalidCredential),
            Err(GatewayError::Timeout(Duration::from_secs(120))),
            Err(GatewayError::UnexpectedStatus {
                status: 500,
                body: "boom".into(),
            }),
            Ok("finally".into()),
        ]));

        let generation = executor(gateway.clone(), rotator)
            .execute("prompt", KeySelection::Default, &NoProgress)
            .await
            .unwrap();

        assert_eq!(generation.attempts, 5);
        assert_eq!(generation.credential.get(), 2);
        assert_eq!(generation.timeout, Duration::from_secs(60));

        let calls = gateway.calls();
        let keys: Vec<&str> = calls.iter().map(|c| c.credential.as_str()).collect();
        assert_eq!(keys, vec!["key-1", "key-2", "key-3", "key-1", "key-2"]);
        let timeouts: Vec<u64> = calls.iter().map(|c| c.timeout.as_secs()).collect();
        assert_eq!(timeouts, vec![60, 90, 120, 180, 60]);
        assert_eq!(store.load(), Some(3));
    }

    #[tokio::test]
    async fn test_pinned_first_attempt_then_rotation() {
        let store = Arc::new(InMemoryRotationStore::with_cursor(1));
        let rotator = rotator_with(3, store.clone(), None);
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Err(GatewayError::RateLimited { status: 403 }),
            Ok("ok".into()),
        ]));

        let generation = executor(gateway.clone(), rotator)
            .execute("prompt", KeySelection::Pinned(number(3)), &NoProgress)
            .await
            .unwrap();

        let keys: Vec<String> = gateway.calls().into_iter().map(|c| c.credential).collect();
        assert_eq!(keys, vec!["key-3", "key-1"]);
        assert_eq!(generation.credential.get(), 1);
        assert_eq!(store.load(), Some(2));
    }

    #[tokio::test]
    async fn test_override_applies_to_first_attempt_only() {
        let store = Arc::new(InMemoryRotationStore::with_cursor(1));
        let rotator = rotator_with(3, store.clone(), Some(number(2)));
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Err(GatewayError::Transport("reset".into())),
            Ok("ok".into()),
        ]));

        executor(gateway.clone(), rotator)
            .execute("prompt", KeySelection::Default, &NoProgress)
            .await
            .unwrap();

        let keys: Vec<String> = gateway.calls().into_iter().map(|c| c.credential).collect();
        assert_eq!(keys, vec!["key-2", "key-1"]);
        assert_eq!(store.load(), Some(2));
    }

    #[tokio::test]
    async fn test_bounded_policy_exhausts() {
        let rotator = rotator_with(2, Arc::new(InMemoryRotationStore::new()), None);
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Err(GatewayError::RateLimited { status: 403 }),
            Err(GatewayError::RateLimited { status: 403 }),
            Ok("never reached".into()),
        ]));

        let result = executor(gateway.clone(), rotator)
            .with_policy(RetryPolicy::default().with_max_attempts(Some(2)))
            .execute("prompt", KeySelection::Rotate, &NoProgress)
            .await;

        match result {
            Err(ExecuteError::Exhausted { attempts, last }) => {
                assert_eq!(attempts, 2);
                assert_eq!(last, GatewayError::RateLimited { status: 403 });
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
        assert_eq!(gateway.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_non_recoverable_status_rejected() {
        let rotator = rotator_with(2, Arc::new(InMemoryRotationStore::new()), None);
        let gateway = Arc::new(ScriptedGateway::new(vec![Err(GatewayError::InvalidCredential)]));

        let result = executor(gateway.clone(), rotator)
            .with_policy(RetryPolicy::default().with_recoverable_status(|status| status != 400))
            .execute("prompt", KeySelection::Rotate, &NoProgress)
            .await;

        assert!(matches!(
            result,
            Err(ExecuteError::Rejected { source: GatewayError::InvalidCredential, .. })
        ));
        assert_eq!(gateway.calls().len(), 1);
    }
}
