//! Report store port
//!
//! Reads and writes the markdown reports produced by each run.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when accessing reports
#[derive(Error, Debug)]
pub enum ReportStoreError {
    #[error("Report not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Storage for report documents
pub trait ReportStore: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Full text of an existing report
    fn read(&self, path: &Path) -> Result<String, ReportStoreError>;

    /// Create or overwrite a report, creating missing parent directories
    fn write(&self, path: &Path, contents: &str) -> Result<(), ReportStoreError>;
}
