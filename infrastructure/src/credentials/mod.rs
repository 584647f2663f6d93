//! Credential discovery from the process environment

mod env_loader;

pub use env_loader::{PLACEHOLDER_KEY, load_credentials, load_credentials_from};
