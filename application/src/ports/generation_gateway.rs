//! Generation gateway port
//!
//! Defines the interface for sending one prompt to the text generation API.

use async_trait::async_trait;
use delegate_domain::{Credential, Model};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during a single generation attempt
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Rate limited (HTTP {status})")]
    RateLimited { status: u16 },

    #[error("Invalid API key (HTTP 400)")]
    InvalidCredential,

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// HTTP status behind the failure, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::RateLimited { status } => Some(*status),
            GatewayError::InvalidCredential => Some(400),
            GatewayError::UnexpectedStatus { status, .. } => Some(*status),
            GatewayError::Timeout(_) | GatewayError::Transport(_) | GatewayError::Decode(_) => None,
        }
    }
}

/// Gateway for text generation
///
/// One call is one HTTP attempt; retrying and credential rotation are the
/// caller's concern. Implementations (adapters) live in the infrastructure
/// layer.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Send `prompt` to `model` authenticated with `credential`.
    ///
    /// A successful response without any candidate text yields an empty
    /// string rather than an error.
    async fn generate(
        &self,
        model: &Model,
        credential: &Credential,
        prompt: &str,
        timeout: Duration,
    ) -> Result<String, GatewayError>;
}
