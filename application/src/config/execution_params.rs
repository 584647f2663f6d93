//! Execution parameters for use case control.
//!
//! [`ExecutionParams`] groups the static parameters the research, improve
//! and delegation use cases read. These are application-layer concerns,
//! not domain policy.

use delegate_domain::{DEFAULT_THRESHOLD, Model, QualityGate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default directory for new reports
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// Default assessment rounds per agent
pub const DEFAULT_MAX_ITERATIONS: usize = 3;

/// Use case control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Model every request is sent to.
    pub model: Model,
    /// Directory new reports are written into.
    pub output_dir: PathBuf,
    /// Assessment rounds per agent when the caller does not choose.
    pub max_iterations: usize,
    /// Score at or above which an answer is accepted.
    pub quality_threshold: f64,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            quality_threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_quality_threshold(mut self, threshold: f64) -> Self {
        self.quality_threshold = threshold;
        self
    }

    pub fn quality_gate(&self) -> QualityGate {
        QualityGate::new(self.quality_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert_eq!(params.model, Model::Gemini25Pro);
        assert_eq!(params.output_dir, PathBuf::from("outputs"));
        assert_eq!(params.max_iterations, 3);
        assert_eq!(params.quality_threshold, 7.0);
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default()
            .with_model(Model::Gemini25Flash)
            .with_output_dir("/tmp/reports")
            .with_max_iterations(5)
            .with_quality_threshold(8.5);

        assert_eq!(params.model, Model::Gemini25Flash);
        assert_eq!(params.output_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(params.max_iterations, 5);
        assert!(params.quality_gate().passes(8.5));
        assert!(!params.quality_gate().passes(8.4));
    }
}
