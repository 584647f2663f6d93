//! Credential pool entities.
//!
//! Credentials are opaque API keys. Operators address them by a 1-based
//! [`CredentialNumber`]; numbering wraps modulo the pool size, so key 5 in a
//! pool of 3 is the same key as key 2.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// 1-based logical position of a credential in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialNumber(usize);

impl CredentialNumber {
    /// The first credential
    pub const FIRST: CredentialNumber = CredentialNumber(1);

    pub fn new(number: usize) -> Result<Self, DomainError> {
        if number == 0 {
            Err(DomainError::InvalidCredentialNumber(number))
        } else {
            Ok(Self(number))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Wrap into `[1, pool_len]`
    pub fn normalized(self, pool_len: usize) -> CredentialNumber {
        CredentialNumber((self.0 - 1) % pool_len + 1)
    }

    /// The number `offset` positions after this one, wrapping at `pool_len`
    pub fn offset(self, offset: usize, pool_len: usize) -> CredentialNumber {
        CredentialNumber((self.0 - 1 + offset) % pool_len + 1)
    }
}

impl std::fmt::Display for CredentialNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single API key.
///
/// `Debug` and `Display` only ever show the masked form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw secret, for building requests only
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `...` followed by the last four characters
    pub fn masked(&self) -> String {
        let tail: String = self
            .0
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("...{}", tail)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

impl std::fmt::Display for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.masked())
    }
}

/// Ordered, non-empty set of interchangeable credentials fixed at startup
#[derive(Debug, Clone)]
pub struct CredentialPool {
    credentials: Vec<Credential>,
}

impl CredentialPool {
    pub fn new(credentials: Vec<Credential>) -> Result<Self, DomainError> {
        if credentials.is_empty() {
            return Err(DomainError::EmptyCredentialPool);
        }
        Ok(Self { credentials })
    }

    pub fn from_secrets<I, S>(secrets: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(secrets.into_iter().map(Credential::new).collect())
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Always false for a constructed pool
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// Credential at a logical position, wrapping modulo pool size
    pub fn get(&self, number: CredentialNumber) -> &Credential {
        &self.credentials[number.normalized(self.len()).get() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: usize) -> CredentialPool {
        CredentialPool::from_secrets((1..=n).map(|i| format!("secret-key-{i:04}"))).unwrap()
    }

    #[test]
    fn test_empty_pool_rejected() {
        let result = CredentialPool::new(vec![]);
        assert_eq!(result.unwrap_err(), DomainError::EmptyCredentialPool);
    }

    #[test]
    fn test_zero_credential_number_rejected() {
        assert!(CredentialNumber::new(0).is_err());
        assert_eq!(CredentialNumber::new(3).unwrap().get(), 3);
    }

    #[test]
    fn test_get_wraps_modulo_pool_size() {
        let pool = pool(3);
        let five = CredentialNumber::new(5).unwrap();
        assert_eq!(pool.get(five).expose(), "secret-key-0002");
        assert_eq!(pool.get(CredentialNumber::FIRST).expose(), "secret-key-0001");
    }

    #[test]
    fn test_offset_wraps() {
        let three = CredentialNumber::new(3).unwrap();
        assert_eq!(three.offset(1, 3).get(), 1);
        assert_eq!(three.offset(0, 3).get(), 3);
        assert_eq!(three.offset(7, 3).get(), 1);
    }

    #[test]
    fn test_credential_is_masked() {
        let credential = Credential::new("AIzaSyExampleKey1234");
        assert_eq!(credential.masked(), "...1234");
        assert_eq!(format!("{credential}"), "...1234");
        assert!(!format!("{credential:?}").contains("AIza"));
    }

    #[test]
    fn test_short_credential_mask() {
        assert_eq!(Credential::new("ab").masked(), "...ab");
    }
}
