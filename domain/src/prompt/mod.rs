//! Prompt domain
//!
//! Templates for the assessment and revision requests of the improvement loop.

mod template;

pub use template::PromptTemplate;
