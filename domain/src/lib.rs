//! Domain layer for gemini-delegate
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Credential rotation
//!
//! A [`CredentialPool`] holds interchangeable API keys numbered from 1.
//! [`RotationState`] is the persisted round-robin cursor that picks the next
//! key for each default-mode request.
//!
//! ## Retry
//!
//! [`RetryPolicy`] describes the per-attempt timeout escalation and whether a
//! request is retried at all. By default every failure is retried forever.
//!
//! ## Delegation and quality gating
//!
//! A task fans out into [`task_variants`], one per agent. Each agent's answer
//! is assessed and revised while its score stays below the [`QualityGate`]
//! and iterations remain.

pub mod core;
pub mod credential;
pub mod delegation;
pub mod prompt;
pub mod quality;
pub mod report;
pub mod retry;

// Re-export commonly used types
pub use core::{error::DomainError, model::Model, task::Task};
pub use credential::{Credential, CredentialNumber, CredentialPool, RotationState};
pub use delegation::{
    AgentOutcome, AgentStatus, CredentialAssignment, DelegationResult, MAX_AGENTS,
    MAX_ITERATIONS, StopReason, task_variants, validate_agent_count, validate_iterations,
};
pub use prompt::PromptTemplate;
pub use quality::{
    Assessment, DEFAULT_THRESHOLD, IterationState, LoopDecision, QualityGate, parse_improvements,
    parse_score,
};
pub use report::{Report, ReportKind, extract_keywords, report_file_name, sanitize_stem};
pub use retry::{DEFAULT_TIMEOUTS, RetryPolicy};
