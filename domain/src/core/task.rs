//! Task value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A task or research topic handed to the agents (Value Object)
///
/// Immutable once created; variants derived from it never replace the
/// original, which is what answers are assessed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    content: String,
}

impl Task {
    /// Create a task, rejecting empty or whitespace-only text
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::EmptyTask)
        } else {
            Ok(Self { content })
        }
    }

    /// Get the task content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::try_new("Plan a product launch").unwrap();
        assert_eq!(task.content(), "Plan a product launch");
        assert_eq!(task.to_string(), "Plan a product launch");
    }

    #[test]
    fn test_empty_task_rejected() {
        assert_eq!(Task::try_new("").unwrap_err(), DomainError::EmptyTask);
        assert_eq!(Task::try_new("   \n").unwrap_err(), DomainError::EmptyTask);
    }
}
