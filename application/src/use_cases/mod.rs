//! Use cases (application services)
//!
//! - [`credential_rotator`]: round-robin and fixed credential selection
//! - [`execute_request`]: one prompt with retry and rotation
//! - [`run_research`] / [`improve_report`]: single-shot operations
//! - [`quality_loop`]: assess and revise one agent's answer
//! - [`delegate_task`]: fan a task out to several agents

pub mod credential_rotator;
pub mod delegate_task;
pub mod execute_request;
pub mod improve_report;
pub mod quality_loop;
pub mod run_research;

#[cfg(test)]
pub(crate) mod test_support;
