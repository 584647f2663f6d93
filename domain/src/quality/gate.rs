//! Quality gate and per-agent iteration state.
//!
//! An agent moves through `Init -> Assessing -> (Improving -> Assessing)* -> Done`.
//! [`IterationState`] holds what survives between those steps and decides,
//! after each assessment, whether the agent stops or revises again.

use crate::delegation::StopReason;
use serde::{Deserialize, Serialize};

/// Score at or above which an answer is accepted
pub const DEFAULT_THRESHOLD: f64 = 7.0;

/// Score threshold below which answers are revised
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityGate {
    threshold: f64,
}

impl Default for QualityGate {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl QualityGate {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn passes(&self, score: f64) -> bool {
        score >= self.threshold
    }
}

/// What the loop does after an assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopDecision {
    Improve,
    Done(StopReason),
}

/// Ephemeral per-agent loop state
#[derive(Debug, Clone, PartialEq)]
pub struct IterationState {
    answer: String,
    score: Option<f64>,
    iteration: usize,
    max_iterations: usize,
}

impl IterationState {
    /// State after the initial answer succeeded (iteration 1)
    pub fn start(answer: impl Into<String>, max_iterations: usize) -> Self {
        Self {
            answer: answer.into(),
            score: None,
            iteration: 1,
            max_iterations: max_iterations.max(1),
        }
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Latest assessed score, 0.0 before the first assessment
    pub fn score(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Record an assessment of the current answer and decide the next step
    pub fn record_assessment(&mut self, score: f64, gate: &QualityGate) -> LoopDecision {
        self.score = Some(score);
        if gate.passes(score) {
            LoopDecision::Done(StopReason::ThresholdMet)
        } else if self.iteration >= self.max_iterations {
            LoopDecision::Done(StopReason::IterationCap)
        } else {
            LoopDecision::Improve
        }
    }

    /// Replace the answer with a revision and count the new iteration
    pub fn record_revision(&mut self, answer: impl Into<String>) {
        self.answer = answer.into();
        self.iteration += 1;
    }
}
