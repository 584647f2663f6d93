//! Task fan-out: variants, credential assignment and aggregated outcomes.

pub mod assignment;
pub mod value_objects;
pub mod variants;

pub use assignment::{
    CredentialAssignment, MAX_AGENTS, MAX_ITERATIONS, validate_agent_count, validate_iterations,
};
pub use value_objects::{AgentOutcome, AgentStatus, DelegationResult, StopReason};
pub use variants::{GENERIC_APPROACHES, task_variants};
