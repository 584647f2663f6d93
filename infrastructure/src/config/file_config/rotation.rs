//! Rotation configuration from TOML (`[rotation]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw rotation configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRotationConfig {
    /// `.env`-style file holding the cursor line
    pub state_file: PathBuf,
    /// Variable name of the cursor line
    pub cursor_key: String,
}

impl Default for FileRotationConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from(".env"),
            cursor_key: "GEMINI_KEY_INDEX".to_string(),
        }
    }
}
