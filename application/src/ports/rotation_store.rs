//! Rotation store port
//!
//! Persists the round-robin cursor between invocations.

use thiserror::Error;

/// Errors that can occur when persisting the cursor
#[derive(Error, Debug)]
pub enum RotationStoreError {
    #[error("Failed to read rotation state from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write rotation state to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Storage for the rotation cursor
///
/// No locking is implied: two processes sharing a store may read the same
/// value and both advance it.
pub trait RotationStore: Send + Sync {
    /// Raw persisted cursor; `None` when missing or unreadable
    fn load(&self) -> Option<usize>;

    /// Persist a new cursor value
    fn save(&self, cursor: usize) -> Result<(), RotationStoreError>;
}
