//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod generation_gateway;
pub mod progress;
pub mod report_store;
pub mod rotation_store;
