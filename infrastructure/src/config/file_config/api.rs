//! API configuration from TOML (`[api]` section)

use delegate_domain::Model;
use serde::{Deserialize, Serialize};

/// Default endpoint root for the generation API
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default prefix of the numbered credential variables
pub const DEFAULT_KEY_PREFIX: &str = "GEMINI_API_KEY_";

/// Raw API configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Model name sent in the request path
    pub model: String,
    /// Endpoint root, without the `/models/...` suffix
    pub base_url: String,
    /// Credentials are read from `{key_prefix}1`, `{key_prefix}2`, ...
    pub key_prefix: String,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            model: Model::default().to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl FileApiConfig {
    pub fn model(&self) -> Model {
        Model::from(self.model.trim())
    }
}
