//! Credential pool and round-robin rotation state.

pub mod pool;
pub mod rotation;

pub use pool::{Credential, CredentialNumber, CredentialPool};
pub use rotation::RotationState;
