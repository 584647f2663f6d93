//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No API keys found; define GEMINI_API_KEY_1, GEMINI_API_KEY_2, ...")]
    EmptyCredentialPool,

    #[error("Credential number must be 1 or greater, got {0}")]
    InvalidCredentialNumber(usize),

    #[error("Agent count must be between 1 and 8, got {0}")]
    InvalidAgentCount(usize),

    #[error("Max iterations must be between 1 and 10, got {0}")]
    InvalidIterations(usize),

    #[error("Task cannot be empty")]
    EmptyTask,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pool_display_mentions_env_vars() {
        let error = DomainError::EmptyCredentialPool;
        assert!(error.to_string().contains("GEMINI_API_KEY_1"));
    }
}
