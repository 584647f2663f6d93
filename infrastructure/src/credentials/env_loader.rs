//! Numbered credential variables.
//!
//! Credentials are read from `{prefix}1`, `{prefix}2`, ... and stop at the
//! first variable that is missing, empty, or still holds the template
//! placeholder. Later variables after a gap are ignored.

use delegate_domain::{CredentialPool, DomainError};
use tracing::debug;

/// Value shipped in the example env file
pub const PLACEHOLDER_KEY: &str = "your_api_key_here";

/// Build the pool from the process environment
pub fn load_credentials(prefix: &str) -> Result<CredentialPool, DomainError> {
    load_credentials_from(prefix, |name| std::env::var(name).ok())
}

/// Build the pool from any variable lookup
pub fn load_credentials_from<F>(prefix: &str, lookup: F) -> Result<CredentialPool, DomainError>
where
    F: Fn(&str) -> Option<String>,
{
    let secrets: Vec<String> = (1..)
        .map(|i| lookup(&format!("{prefix}{i}")))
        .take_while(|value| {
            value
                .as_deref()
                .is_some_and(|v| !v.trim().is_empty() && v != PLACEHOLDER_KEY)
        })
        .flatten()
        .collect();

    debug!("Loaded {} credential(s) from {}N", secrets.len(), prefix);
    CredentialPool::from_secrets(secrets)
}
