//! Rotation cursor kept as a `KEY=value` line in a `.env`-style file.
//!
//! The file usually also holds the credentials themselves, so every write
//! rewrites only the cursor line and leaves all other lines untouched and
//! in order. A missing line is appended.

use delegate_application::{RotationStore, RotationStoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// [`RotationStore`] over a line-oriented env file
#[derive(Debug, Clone)]
pub struct EnvFileRotationStore {
    path: PathBuf,
    key: String,
}

impl EnvFileRotationStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn value_of<'a>(&self, line: &'a [u8]) -> Option<&'a [u8]> {
        line.trim_ascii()
            .strip_prefix(self.key.as_bytes())
            .and_then(|rest| rest.strip_prefix(b"="))
    }

    /// File contents; a missing file reads as empty
    fn read(&self) -> Result<Vec<u8>, RotationStoreError> {
        match fs::read(&self.path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(RotationStoreError::Read {
                path: self.path.display().to_string(),
                source,
            }),
        }
    }

    /// `contents` with the cursor line set to `cursor`.
    ///
    /// Lines are handled as bytes so non-UTF-8 content survives, and the
    /// replaced line keeps its own terminator.
    fn rewrite(&self, contents: &[u8], cursor: usize) -> Vec<u8> {
        let entry = format!("{}={}", self.key, cursor);
        let mut replaced = false;
        let mut out = Vec::with_capacity(contents.len() + entry.len() + 2);

        for line in contents.split_inclusive(|&b| b == b'\n') {
            if !replaced && self.value_of(line).is_some() {
                out.extend_from_slice(entry.as_bytes());
                if line.ends_with(b"\r\n") {
                    out.extend_from_slice(b"\r\n");
                } else if line.ends_with(b"\n") {
                    out.push(b'\n');
                }
                replaced = true;
            } else {
                out.extend_from_slice(line);
            }
        }

        if !replaced {
            let newline: &[u8] = if contents.windows(2).any(|w| w == b"\r\n") {
                b"\r\n"
            } else {
                b"\n"
            };
            if !out.is_empty() && !out.ends_with(b"\n") {
                out.extend_from_slice(newline);
            }
            out.extend_from_slice(entry.as_bytes());
            out.extend_from_slice(newline);
        }
        out
    }
}

impl RotationStore for EnvFileRotationStore {
    fn load(&self) -> Option<usize> {
        let contents = match self.read() {
            Ok(contents) => contents,
            Err(e) => {
                debug!("Rotation state unavailable: {}", e);
                return None;
            }
        };
        contents
            .split(|&b| b == b'\n')
            .find_map(|line| self.value_of(line))
            .and_then(|value| std::str::from_utf8(value).ok())
            .and_then(|value| value.trim().parse().ok())
    }

    /// Rewrite the cursor line; an unreadable file is left untouched
    fn save(&self, cursor: usize) -> Result<(), RotationStoreError> {
        let contents = self.read()?;
        fs::write(&self.path, self.rewrite(&contents, cursor)).map_err(|source| {
            RotationStoreError::Write {
                path: self.path.display().to_string(),
                source,
            }
        })
    }
}
