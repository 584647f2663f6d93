//! Gemini `generateContent` adapter
//!
//! - [`gateway::GeminiGateway`]: [`GenerationGateway`](delegate_application::GenerationGateway)
//!   over HTTPS with the credential in the `key` query parameter
//! - [`types`]: request and response bodies

pub mod gateway;
pub mod types;

pub use gateway::GeminiGateway;
