//! Configuration file loading for gemini-delegate
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables `GEMINI_DELEGATE_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./gemini-delegate.toml` or `./.gemini-delegate.toml`
//! 4. Global: `$XDG_CONFIG_HOME/gemini-delegate/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_BASE_URL, DEFAULT_KEY_PREFIX, FileApiConfig, FileConfig,
    FileOutputConfig, FileQualityConfig, FileRetryConfig, FileRotationConfig,
};
pub use loader::{ConfigError, ConfigLoader, ENV_PREFIX};
