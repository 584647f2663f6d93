//! Application layer for gemini-delegate
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    generation_gateway::{GatewayError, GenerationGateway},
    progress::{NoProgress, ProgressNotifier},
    report_store::{ReportStore, ReportStoreError},
    rotation_store::{RotationStore, RotationStoreError},
};
pub use use_cases::credential_rotator::CredentialRotator;
pub use use_cases::delegate_task::{DelegateError, DelegateTaskInput, DelegateTaskUseCase};
pub use use_cases::execute_request::{ExecuteError, Generation, KeySelection, RequestExecutor};
pub use use_cases::improve_report::{ImproveOutput, ImproveReportError, ImproveReportUseCase};
pub use use_cases::quality_loop::{AgentAssignment, QualityLoop};
pub use use_cases::run_research::{ResearchOutput, RunResearchError, RunResearchUseCase};
