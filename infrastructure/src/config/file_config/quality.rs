//! Quality loop configuration from TOML (`[quality]` section)

use delegate_domain::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};

/// Raw quality configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQualityConfig {
    /// Score at or above which an answer is accepted
    pub threshold: f64,
    /// Assessment rounds per agent when `--iterations` is not given
    pub max_iterations: usize,
}

impl Default for FileQualityConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_iterations: 3,
        }
    }
}
