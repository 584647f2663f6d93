//! File-backed rotation cursor storage

mod env_file_store;

pub use env_file_store::EnvFileRotationStore;
