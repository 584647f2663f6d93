//! Infrastructure layer for gemini-delegate
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod credentials;
pub mod gemini;
pub mod report;
pub mod rotation;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, ConfigValidationError, FileApiConfig, FileConfig,
    FileOutputConfig, FileQualityConfig, FileRetryConfig, FileRotationConfig,
};
pub use credentials::{load_credentials, load_credentials_from};
pub use gemini::GeminiGateway;
pub use report::FsReportStore;
pub use rotation::EnvFileRotationStore;
