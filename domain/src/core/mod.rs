//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the Gemini model identifier requests are sent to
//! - [`task::Task`]: a validated task or research topic
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod string;
pub mod task;
