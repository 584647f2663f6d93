//! Reports stored as plain UTF-8 files.

use delegate_application::{ReportStore, ReportStoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// [`ReportStore`] over the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReportStore;

impl FsReportStore {
    pub fn new() -> Self {
        Self
    }
}

impl ReportStore for FsReportStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> Result<String, ReportStoreError> {
        fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ReportStoreError::NotFound(path.to_path_buf()),
            _ => ReportStoreError::Read {
                path: path.to_path_buf(),
                source,
            },
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), ReportStoreError> {
        let to_error = |source| ReportStoreError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(to_error)?;
        }
        fs::write(path, contents).map_err(to_error)?;
        debug!("Wrote {} ({} bytes)", path.display(), contents.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("outputs/nested/AGENT1_x_TASK.md");
        let store = FsReportStore::new();

        store.write(&path, "# Report").unwrap();

        assert!(store.exists(&path));
        assert_eq!(store.read(&path).unwrap(), "# Report");
    }

    #[test]
    fn test_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.md");
        let store = FsReportStore::new();

        store.write(&path, "old").unwrap();
        store.write(&path, "new").unwrap();

        assert_eq!(store.read(&path).unwrap(), "new");
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.md");
        let store = FsReportStore::new();

        assert!(!store.exists(&path));
        assert!(matches!(store.read(&path), Err(ReportStoreError::NotFound(_))));
    }

    #[test]
    fn test_directory_is_not_a_report() {
        let dir = TempDir::new().unwrap();
        assert!(!FsReportStore::new().exists(dir.path()));
    }
}
