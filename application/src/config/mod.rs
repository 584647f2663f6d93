//! Application-level configuration.
//!
//! - [`ExecutionParams`]: model, output location and quality loop control
//!   shared by every use case

pub mod execution_params;

pub use execution_params::ExecutionParams;
