//! Retry configuration from TOML (`[retry]` section)

use delegate_domain::{DEFAULT_TIMEOUTS, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw retry configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    /// Per-attempt timeouts, cycled
    pub timeouts_secs: Vec<u64>,
    /// Attempts per request; unset retries forever
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<usize>,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        Self {
            timeouts_secs: DEFAULT_TIMEOUTS.iter().map(Duration::as_secs).collect(),
            max_attempts: None,
        }
    }
}

impl FileRetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_timeouts(
                self.timeouts_secs
                    .iter()
                    .copied()
                    .map(Duration::from_secs)
                    .collect(),
            )
            .with_max_attempts(self.max_attempts)
    }
}
