//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain and
//! application types where they are used.

mod api;
mod output;
mod quality;
mod retry;
mod rotation;

pub use api::{DEFAULT_BASE_URL, DEFAULT_KEY_PREFIX, FileApiConfig};
pub use output::FileOutputConfig;
pub use quality::FileQualityConfig;
pub use retry::FileRetryConfig;
pub use rotation::FileRotationConfig;

use delegate_application::ExecutionParams;
use delegate_domain::MAX_ITERATIONS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("api.model cannot be empty")]
    EmptyModelName,

    #[error("api.key_prefix cannot be empty")]
    EmptyKeyPrefix,

    #[error("rotation.cursor_key cannot be empty")]
    EmptyCursorKey,

    #[error("retry.timeouts_secs cannot be empty")]
    EmptyTimeouts,

    #[error("retry.timeouts_secs cannot contain 0")]
    ZeroTimeout,

    #[error("retry.max_attempts cannot be 0")]
    ZeroMaxAttempts,

    #[error("quality.threshold must be between 1 and 10, got {0}")]
    InvalidThreshold(f64),

    #[error("quality.max_iterations must be between 1 and 10, got {0}")]
    InvalidMaxIterations(usize),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Endpoint, model and credential naming
    pub api: FileApiConfig,
    /// Persisted rotation cursor
    pub rotation: FileRotationConfig,
    /// Timeout escalation and attempt cap
    pub retry: FileRetryConfig,
    /// Quality gate settings
    pub quality: FileQualityConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.api.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.api.key_prefix.trim().is_empty() {
            return Err(ConfigValidationError::EmptyKeyPrefix);
        }
        if self.rotation.cursor_key.trim().is_empty() {
            return Err(ConfigValidationError::EmptyCursorKey);
        }
        if self.retry.timeouts_secs.is_empty() {
            return Err(ConfigValidationError::EmptyTimeouts);
        }
        if self.retry.timeouts_secs.contains(&0) {
            return Err(ConfigValidationError::ZeroTimeout);
        }
        if self.retry.max_attempts == Some(0) {
            return Err(ConfigValidationError::ZeroMaxAttempts);
        }
        if !(1.0..=10.0).contains(&self.quality.threshold) {
            return Err(ConfigValidationError::InvalidThreshold(
                self.quality.threshold,
            ));
        }
        if !(1..=MAX_ITERATIONS).contains(&self.quality.max_iterations) {
            return Err(ConfigValidationError::InvalidMaxIterations(
                self.quality.max_iterations,
            ));
        }
        Ok(())
    }

    /// Use case parameters derived from this configuration
    pub fn execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_model(self.api.model())
            .with_output_dir(self.output.dir.clone())
            .with_max_iterations(self.quality.max_iterations)
            .with_quality_threshold(self.quality.threshold)
    }
}
